//! Arguments of the `create-superuser` command.

use clap::Args;
use roster_core::account::RegisterAccount;

/// Account fields for a new administrator.
///
/// Every field passes the same validation as a self-service registration.
/// The password strength policy is not applied.
#[derive(Clone, Args)]
pub struct SuperuserArgs {
    #[arg(long, env = "ROSTER_SUPERUSER_FIRST_NAME")]
    pub first_name: String,

    #[arg(long, env = "ROSTER_SUPERUSER_LAST_NAME")]
    pub last_name: String,

    #[arg(long, env = "ROSTER_SUPERUSER_EMAIL")]
    pub email: String,

    #[arg(long, env = "ROSTER_SUPERUSER_COUNTRY")]
    pub country: String,

    #[arg(long, env = "ROSTER_SUPERUSER_CITY")]
    pub city: String,

    #[arg(long, env = "ROSTER_SUPERUSER_ADDRESS")]
    pub address: String,

    /// Format `+<country code> <number>`, for example `+44 987654321`.
    #[arg(long, env = "ROSTER_SUPERUSER_MOBILE_PHONE")]
    pub mobile_phone: String,

    /// Prefer the environment variable over the flag to keep it out of shell history.
    #[arg(long, env = "ROSTER_SUPERUSER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl std::fmt::Debug for SuperuserArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperuserArgs")
            .field("email", &self.email)
            .field("mobile_phone", &self.mobile_phone)
            .finish_non_exhaustive()
    }
}

impl From<SuperuserArgs> for RegisterAccount {
    fn from(args: SuperuserArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            country: args.country,
            city: args.city,
            address: args.address,
            mobile_phone: args.mobile_phone,
            password: args.password,
        }
    }
}
