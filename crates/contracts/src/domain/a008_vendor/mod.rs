pub mod aggregate;
pub mod onboarding;
