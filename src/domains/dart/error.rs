//! Errors raised while talking to DART or maintaining the corporation index.

use thiserror::Error;

/// Result type for DART operations.
pub type DartResult<T> = Result<T, DartError>;

/// DART status code for "no data found".
pub const STATUS_NO_DATA: &str = "013";

/// Errors that can occur when querying the DART API.
#[derive(Debug, Error)]
pub enum DartError {
    /// `DART_API_KEY` is not configured; raised before any request is sent.
    #[error("DART_API_KEY is not set. Get a key at https://opendart.fss.or.kr and export DART_API_KEY")]
    MissingApiKey,

    /// The request could not be sent or the body could not be read.
    #[error("DART request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// DART answered with a non-2xx status and no DART error envelope.
    #[error("DART request failed: HTTP {status}")]
    HttpStatus { status: u16 },

    /// DART answered with a status code other than `000`.
    #[error("DART API error {status}: {message}")]
    Api { status: String, message: String },

    /// DART reported status `013`: nothing matched the query.
    #[error("DART API error 013: {message}")]
    NoData { message: String },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode DART response: {0}")]
    Decode(String),

    /// The corporation code archive could not be unpacked.
    #[error("Failed to read corporation code archive: {0}")]
    Archive(String),

    /// The corporation code XML could not be parsed.
    #[error("Failed to parse corporation code XML: {0}")]
    Xml(String),

    /// The local corporation index failed.
    #[error("Corporation index error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A blocking index task panicked or was cancelled.
    #[error("Corporation index task failed: {0}")]
    Task(String),
}

impl DartError {
    /// Build the error for a non-`000` DART status.
    pub fn from_status(status: impl Into<String>, message: impl Into<String>) -> Self {
        let status = status.into();
        let mut message = message.into();
        if message.trim().is_empty() {
            message = describe_status(&status).to_string();
        }
        if status == STATUS_NO_DATA {
            Self::NoData { message }
        } else {
            Self::Api { status, message }
        }
    }

    /// Whether this error only means DART had nothing to return.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}

/// Human-readable meaning of DART's documented status codes.
pub fn describe_status(status: &str) -> &'static str {
    match status {
        "000" => "정상",
        "010" => "등록되지 않은 키입니다.",
        "011" => "사용할 수 없는 키입니다.",
        "012" => "접근할 수 없는 IP입니다.",
        "013" => "조회된 데이타가 없습니다.",
        "014" => "파일이 존재하지 않습니다.",
        "020" => "요청 제한을 초과하였습니다.",
        "021" => "조회 가능한 회사 개수가 초과하였습니다.",
        "100" => "필드의 부적절한 값입니다.",
        "101" => "부적절한 접근입니다.",
        "800" => "시스템 점검으로 인한 서비스가 중지 중입니다.",
        "900" => "정의되지 않은 오류가 발생하였습니다.",
        "901" => "사용자 계정의 개인정보 보유기간이 만료되어 사용할 수 없는 키입니다.",
        _ => "알 수 없는 오류",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_status_maps_to_no_data() {
        let err = DartError::from_status("013", "조회된 데이타가 없습니다.");
        assert!(err.is_no_data());
        assert!(err.to_string().contains("013"));
    }

    #[test]
    fn test_api_status_keeps_message() {
        let err = DartError::from_status("010", "등록되지 않은 키입니다.");
        assert!(!err.is_no_data());
        assert_eq!(err.to_string(), "DART API error 010: 등록되지 않은 키입니다.");
    }

    #[test]
    fn test_blank_message_falls_back_to_description() {
        let err = DartError::from_status("020", "  ");
        assert!(err.to_string().contains("요청 제한"));
    }
}
