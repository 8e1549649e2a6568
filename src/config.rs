/// Settings for one interpreter session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    /// Keep one root environment for the whole session instead of one per line.
    pub persist_env: bool,
    /// Print the monkey face above parser errors.
    pub show_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: ">> ".to_string(),
            persist_env: true,
            show_banner: true,
        }
    }
}
