use crate::{
  config::TypingConfig,
  model::ModelView,
  rules::LanguageRules,
};

/// The collaborators every operation reads from. Cheap to copy; holds no
/// state of its own.
#[derive(Clone, Copy)]
pub struct TypingContext<'a> {
  pub config: &'a TypingConfig,
  pub model:  &'a dyn ModelView,
  pub rules:  &'a dyn LanguageRules,
}

impl<'a> TypingContext<'a> {
  pub fn new(
    config: &'a TypingConfig,
    model: &'a dyn ModelView,
    rules: &'a dyn LanguageRules,
  ) -> Self {
    Self {
      config,
      model,
      rules,
    }
  }
}
