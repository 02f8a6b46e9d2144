use std::fmt;
use std::fmt::Formatter;

pub mod catalog;
pub mod config;
pub mod domain;
pub mod inventory;
pub mod raw;

/// 도메인 모델에서 사용할 에러 열거
///
/// 검증에 실패했을 때 에러를 반환하는 곳은 일부이며, 나머지는 센티넬 값으로 대체하거나 입력을 무시한다.
/// 어떤 정책을 따르는지는 각 엔티티의 문서를 확인
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// 식별자, 이름, 평점 등 필수 값이 규칙에 맞지 않음
    InvalidArgument(String),

    /// 찾는 대상이 존재하지 않음
    NotFound(String),

    /// 카탈로그 시드 문서의 구조가 올바르지 않음
    MalformedSeed(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidArgument(message) => write!(f, "Invalid argument, {}", message),
            ModelError::NotFound(message) => write!(f, "Not found, {}", message),
            ModelError::MalformedSeed(message) => write!(f, "Malformed seed, {}", message),
        }
    }
}

impl std::error::Error for ModelError {}
