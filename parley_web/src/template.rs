use minijinja::{Environment, context};
use parley_core::Turn;

const HOME_TEMPLATE: &str = "home.html";

/// Compiled page templates.
///
/// Templates are embedded at build time; `.html` names get HTML
/// auto-escaping, so user and model text is rendered inert.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(HOME_TEMPLATE, include_str!("../templates/home.html"))?;
        Ok(Self { env })
    }

    /// Render the chat page.
    pub fn home(
        &self,
        output: Option<&str>,
        chat_history: &[Turn],
    ) -> Result<String, minijinja::Error> {
        self.env
            .get_template(HOME_TEMPLATE)?
            .render(context! { output => output, chat_history => chat_history })
    }
}
