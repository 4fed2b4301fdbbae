//! Template-backed render callbacks (`{"$template": "..."}` children).

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use minijinja::{Environment, UndefinedBehavior, context};

use crate::core::decider::RenderCallback;
use crate::io::config::TemplateConfig;

/// Template engine wrapper around minijinja.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    env: Arc<Environment<'static>>,
    max_output_bytes: usize,
}

impl TemplateEngine {
    pub fn new(cfg: &TemplateConfig) -> Self {
        let mut env = Environment::new();
        if cfg.strict_undefined {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        Self {
            env: Arc::new(env),
            max_output_bytes: cfg.max_output_bytes,
        }
    }

    /// Compile `source` and wrap it as a render callback.
    ///
    /// The template sees `state` (the positive projection) and `props`. An
    /// undefined projection stays undefined in the template, so
    /// `{% if state is undefined %}` works and strict mode rejects printing it.
    pub fn callback(&self, source: &str) -> Result<RenderCallback<String>> {
        self.env
            .template_from_str(source)
            .context("compile $template")?;
        let env = Arc::clone(&self.env);
        let source = source.to_string();
        let limit = self.max_output_bytes;
        Ok(RenderCallback::fallible(move |state, props| {
            let state = if state.is_undefined() {
                minijinja::Value::UNDEFINED
            } else {
                minijinja::Value::from_serialize(state)
            };
            let rendered = env.render_str(&source, context! { state => state, props => props })?;
            if rendered.len() > limit {
                bail!(
                    "template output {} bytes exceeds limit {}",
                    rendered.len(),
                    limit
                );
            }
            Ok(rendered)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Props;
    use crate::core::value::Value;
    use serde_json::json;

    fn engine() -> TemplateEngine {
        TemplateEngine::new(&TemplateConfig::default())
    }

    #[test]
    fn renders_state_and_props() {
        let callback = engine()
            .callback("{{ props.greeting }} {{ state.name }}")
            .expect("compile");
        let props: Props = [("greeting".to_string(), Value::from("hi"))].into_iter().collect();
        let rendered = callback
            .call(&Value::from(json!({"name": "ada"})), &props)
            .expect("render");
        assert_eq!(rendered, "hi ada");
    }

    #[test]
    fn undefined_projection_is_undefined_in_template() {
        let callback = engine()
            .callback("{% if state is undefined %}nothing{% else %}{{ state }}{% endif %} world")
            .expect("compile");
        let rendered = callback.call(&Value::Undefined, &Props::new()).expect("render");
        assert_eq!(rendered, "nothing world");

        let rendered = callback.call(&Value::Null, &Props::new()).expect("render");
        assert_eq!(rendered, "none world");
    }

    #[test]
    fn rejects_invalid_syntax_up_front() {
        let err = engine().callback("{{ state ").expect_err("invalid");
        assert!(err.to_string().contains("compile $template"));
    }

    #[test]
    fn strict_mode_fails_on_undefined_variables() {
        let cfg = TemplateConfig {
            strict_undefined: true,
            ..TemplateConfig::default()
        };
        let callback = TemplateEngine::new(&cfg)
            .callback("{{ missing }}")
            .expect("compile");
        assert!(callback.call(&Value::Null, &Props::new()).is_err());
    }

    #[test]
    fn enforces_output_limit() {
        let cfg = TemplateConfig {
            max_output_bytes: 4,
            ..TemplateConfig::default()
        };
        let callback = TemplateEngine::new(&cfg)
            .callback("{{ state }}")
            .expect("compile");
        let err = callback
            .call(&Value::from("too long"), &Props::new())
            .expect_err("limit");
        assert!(err.to_string().contains("exceeds limit"));
    }
}
