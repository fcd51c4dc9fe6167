use parley_config::Config;

/// Strategy for writing the default configuration to `~/parley/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let path = Config::create_config()?;
        println!("Config written to {}", path.display());
        println!("Set providers.cohere.api_key there, or export API before running `parley serve`.");
        Ok(())
    }
}
