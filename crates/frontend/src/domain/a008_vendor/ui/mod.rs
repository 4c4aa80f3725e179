pub mod list;
pub mod onboarding;
