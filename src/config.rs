pub mod log;

use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    log: Option<log::Config>,

    /// 기본으로 불러올 카탈로그 시드 파일 경로
    seed: Option<String>,
}

impl AppConfig {
    pub fn log(&self) -> Option<&log::Config> {
        self.log.as_ref()
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }
}

/// 실행 환경을 반환한다. `RUN_MODE`가 설정 되지 않으면 `development`
pub fn run_mode() -> String {
    env::var("RUN_MODE").unwrap_or_else(|_| "development".into())
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// 설정을 로드한다.
///
/// `config/{RUN_MODE}.json` 파일(없으면 무시)을 읽은 뒤 `CATALOG__` 접두사를 가진 환경 변수로 덮어쓴다.
/// 예) `CATALOG__LOG__LEVEL=INFO`, `CATALOG__SEED=data/seed.json`
pub fn load_config() -> Result<AppConfig, config::ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::with_name(&format!("config/{}.json", run_mode())).required(false))
        .add_source(config::Environment::with_prefix("CATALOG").prefix_separator("__").separator("__"))
        .build()?;

    config.try_deserialize()
}
