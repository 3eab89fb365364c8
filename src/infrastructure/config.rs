use serde::Deserialize;

pub const DEFAULT_GEOCODING_URL: &str = "http://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_TIMEMACHINE_URL: &str =
    "https://api.openweathermap.org/data/3.0/onecall/timemachine";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub openweather: OpenWeatherSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenWeatherSettings {
    pub api_key: String,
    pub geocoding_url: String,
    pub timemachine_url: String,
}

/// Load `config/weather.*` (optional) overlaid with `WEATHER__*` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/weather").required(false))
        .add_source(config::Environment::with_prefix("WEATHER").separator("__"));

    build_app_config(builder)
}

fn build_app_config(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<AppConfig> {
    let settings = builder
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("database.url", "sqlite://weather.db")?
        .set_default("openweather.geocoding_url", DEFAULT_GEOCODING_URL)?
        .set_default("openweather.timemachine_url", DEFAULT_TIMEMACHINE_URL)?
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    if app_config.openweather.api_key.trim().is_empty() {
        anyhow::bail!("openweather.api_key must be set (e.g. WEATHER__OPENWEATHER__API_KEY)");
    }

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(contents: &str) -> anyhow::Result<AppConfig> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml));
        build_app_config(builder)
    }

    #[test]
    fn test_defaults_fill_everything_but_the_key() {
        let cfg = from_toml("[openweather]\napi_key = \"abc123\"\n").unwrap();

        assert_eq!(cfg.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.database.url, "sqlite://weather.db");
        assert_eq!(cfg.openweather.api_key, "abc123");
        assert_eq!(cfg.openweather.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.openweather.timemachine_url, DEFAULT_TIMEMACHINE_URL);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let cfg = from_toml(
            r#"
            [server]
            bind_addr = "127.0.0.1:9000"

            [database]
            url = "sqlite::memory:"

            [openweather]
            api_key = "abc123"
            geocoding_url = "http://localhost:1234/geo"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.openweather.geocoding_url, "http://localhost:1234/geo");
        assert_eq!(cfg.openweather.timemachine_url, DEFAULT_TIMEMACHINE_URL);
    }

    #[test]
    fn test_missing_or_blank_api_key_is_rejected() {
        assert!(from_toml("").is_err());

        let err = from_toml("[openweather]\napi_key = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("openweather.api_key"));
    }
}
