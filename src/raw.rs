mod raw_impl;

use std::collections::HashMap;

/// 외부(JSON 등)에서 들어온 타입이 보장되지 않은 값
///
/// 도메인 모델은 이 값을 통해 "잘못된 타입"의 입력을 받으며,
/// 각 엔티티는 필드별 정책(센티넬 대체, 무시, 실패)에 따라 값을 해석한다.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RawValue {
    Null,

    Text(String),

    Number(RawNumber),

    Bool(bool),

    Object(HashMap<String, RawValue>),

    Array(Vec<RawValue>),
}

#[derive(Debug, Copy, Clone)]
pub enum RawNumber {
    Undefined,

    UnsignedInt(u64),

    SignedInt(i64),

    Float(f64),
}

pub type Raw = HashMap<String, RawValue>;

static NULL: RawValue = RawValue::Null;

impl RawValue {

    /// 문자열 값일 경우에만 반환한다.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// 정수 값일 경우에만 반환한다. 실수는 정수로 취급하지 않는다.
    ///
    /// # Example
    /// ```
    /// use book_catalogue::raw::RawValue;
    ///
    /// assert_eq!(RawValue::from(-3).as_int(), Some(-3));
    /// assert_eq!(RawValue::from(3.0).as_int(), None);
    /// assert_eq!(RawValue::from("3").as_int(), None);
    /// ```
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawValue::Number(RawNumber::SignedInt(n)) => Some(*n),
            RawValue::Number(RawNumber::UnsignedInt(n)) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// 음수가 아닌 정수 값일 경우에만 반환한다. `i64` 범위를 넘는 값도 포함한다.
    ///
    /// # Example
    /// ```
    /// use book_catalogue::raw::RawValue;
    ///
    /// assert_eq!(RawValue::from(u64::MAX).as_uint(), Some(u64::MAX));
    /// assert_eq!(RawValue::from(-3).as_uint(), None);
    /// ```
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            RawValue::Number(RawNumber::UnsignedInt(n)) => Some(*n),
            RawValue::Number(RawNumber::SignedInt(n)) => u64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::Array(arr) => Some(arr.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Raw> {
        match self {
            RawValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// 객체 값에서 키에 해당하는 값을 찾는다. 객체가 아니거나 키가 없으면 [`None`]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// [`RawValue::get`]과 같지만 값이 없으면 [`RawValue::Null`]을 반환한다.
    pub fn field(&self, key: &str) -> &RawValue {
        self.get(key).unwrap_or(&NULL)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}
