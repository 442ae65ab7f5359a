//! Password strength evaluation using zxcvbn.

use roster_core::security::{PasswordPolicy, WeakPassword};
use serde::{Deserialize, Serialize};
use zxcvbn::feedback::Feedback;
use zxcvbn::zxcvbn;

use crate::utility::tracing_targets::TRACING_TARGET_PASSWORD_STRENGTH as TRACING_TARGET;

/// Default minimum zxcvbn score.
pub const DEFAULT_MIN_SCORE: u8 = 3;

/// Password strength evaluator using the zxcvbn algorithm.
#[derive(Debug, Clone)]
pub struct PasswordStrength {
    /// Minimum acceptable score (0-4).
    min_score: u8,
}

/// Result of password strength evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordStrengthResult {
    /// Score from 0 (weakest) to 4 (strongest).
    pub score: u8,
    /// Estimated guesses required to crack the password.
    pub guesses: u64,
    /// Optional feedback for improving the password.
    pub feedback: Option<PasswordFeedback>,
}

/// Feedback for improving password strength.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordFeedback {
    /// Warning message about password weaknesses.
    pub warning: Option<String>,
    /// Suggestions for improving the password.
    pub suggestions: Vec<String>,
}

impl PasswordStrength {
    /// Creates a new evaluator with the default minimum score.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new evaluator with a custom minimum score, clamped to 0-4.
    #[inline]
    pub const fn with_min_score(min_score: u8) -> Self {
        let min_score = if min_score > 4 { 4 } else { min_score };
        Self { min_score }
    }

    /// Returns the minimum accepted score.
    #[inline]
    pub const fn min_score(&self) -> u8 {
        self.min_score
    }

    /// Evaluates the strength of a password.
    ///
    /// `user_inputs` are account values (email, names) that are penalized
    /// when they appear in the password.
    pub fn evaluate(&self, password: &str, user_inputs: &[&str]) -> PasswordStrengthResult {
        let entropy = zxcvbn(password, user_inputs);

        let feedback = entropy.feedback().map(Self::convert_feedback);
        let score: u8 = entropy.score().into();

        tracing::debug!(
            target: TRACING_TARGET,
            score = score,
            guesses = entropy.guesses(),
            user_inputs_count = user_inputs.len(),
            "password strength evaluated"
        );

        PasswordStrengthResult {
            score,
            guesses: entropy.guesses(),
            feedback,
        }
    }

    /// Returns `true` if `password` reaches the minimum score.
    pub fn meets_requirements(&self, password: &str, user_inputs: &[&str]) -> bool {
        self.evaluate(password, user_inputs).score >= self.min_score
    }

    fn convert_feedback(feedback: &Feedback) -> PasswordFeedback {
        PasswordFeedback {
            warning: feedback.warning().map(|w| w.to_string()),
            suggestions: feedback
                .suggestions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for PasswordStrength {
    #[inline]
    fn default() -> Self {
        Self::with_min_score(DEFAULT_MIN_SCORE)
    }
}

impl PasswordPolicy for PasswordStrength {
    fn check(&self, password: &str, user_inputs: &[&str]) -> Result<(), WeakPassword> {
        let result = self.evaluate(password, user_inputs);
        if result.score >= self.min_score {
            return Ok(());
        }

        tracing::debug!(
            target: TRACING_TARGET,
            score = result.score,
            min_score = self.min_score,
            "password rejected: insufficient strength"
        );

        let mut message = String::from("This password is too weak.");
        if let Some(feedback) = result.feedback {
            if let Some(warning) = feedback.warning {
                message.push(' ');
                message.push_str(&warning);
            }

            for suggestion in feedback.suggestions {
                message.push(' ');
                message.push_str(&suggestion);
            }
        }

        Err(WeakPassword::new(message))
    }
}
