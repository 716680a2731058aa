use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub frontend_url: String,
    pub jwt_secret: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_recommend_api_url")]
    pub recommend_api_url: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    frontend_url: Option<String>,
    jwt_secret: Option<String>,
    listen_addr: Option<String>,
    recommend_api_url: Option<String>,
    log_dir: Option<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_recommend_api_url() -> String {
    // The hosted recommendation service; override when self-hosting it.
    "https://hackathon-travel-buddy-pb.fly.dev".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl ServerConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config: PartialServerConfig = if let Some(path_str) = config_path {
            let path = Path::new(path_str);
            if path.exists() {
                let contents = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
                toml::from_str(&contents)
                    .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))?
            } else {
                PartialServerConfig::default()
            }
        } else {
            PartialServerConfig::default()
        };

        // 2. Load from environment variables
        let env_config = PartialServerConfig {
            frontend_url: env::var("FRONTEND_URL").ok(),
            jwt_secret: env::var("JWT_SECRET").ok(),
            listen_addr: env::var("LISTEN_ADDR").ok(),
            recommend_api_url: env::var("RECOMMEND_API_URL").ok(),
            log_dir: env::var("LOG_DIR").ok(),
        };

        // 3. Merge: environment overrides file
        Self::merge(env_config, file_config)
    }

    fn merge(
        env_config: PartialServerConfig,
        file_config: PartialServerConfig,
    ) -> Result<Self, String> {
        Ok(ServerConfig {
            frontend_url: env_config
                .frontend_url
                .or(file_config.frontend_url)
                .ok_or("FRONTEND_URL is required")?,
            jwt_secret: env_config
                .jwt_secret
                .or(file_config.jwt_secret)
                .ok_or("JWT_SECRET is required")?,
            listen_addr: env_config
                .listen_addr
                .or(file_config.listen_addr)
                .unwrap_or_else(default_listen_addr),
            recommend_api_url: env_config
                .recommend_api_url
                .or(file_config.recommend_api_url)
                .unwrap_or_else(default_recommend_api_url),
            log_dir: env_config
                .log_dir
                .or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_env_over_file() {
        let env_config = PartialServerConfig {
            jwt_secret: Some("from-env".to_string()),
            ..Default::default()
        };
        let file_config = PartialServerConfig {
            frontend_url: Some("http://localhost:5173".to_string()),
            jwt_secret: Some("from-file".to_string()),
            listen_addr: Some("127.0.0.1:9000".to_string()),
            ..Default::default()
        };

        let config = ServerConfig::merge(env_config, file_config).unwrap();
        assert_eq!(config.jwt_secret, "from-env");
        assert_eq!(config.frontend_url, "http://localhost:5173");
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.recommend_api_url, default_recommend_api_url());
    }

    #[test]
    fn merge_requires_frontend_url_and_jwt_secret() {
        let err = ServerConfig::merge(
            PartialServerConfig::default(),
            PartialServerConfig::default(),
        )
        .unwrap_err();
        assert!(err.contains("FRONTEND_URL"));
    }

    #[test]
    fn file_config_parses_with_defaults() {
        let partial: PartialServerConfig =
            toml::from_str("frontend_url = \"http://localhost:5173\"\njwt_secret = \"secret\"")
                .unwrap();
        let config = ServerConfig::merge(PartialServerConfig::default(), partial).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.log_dir, "logs");
    }
}
