//! Async HTTP client for the OpenDART API.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use super::codes::{FsDiv, ReportCode};
use super::corp_code::{CorpRecord, extract_corp_code_xml, parse_corp_code_xml, parse_status_body};
use super::endpoints::{CORP_CODE_ARCHIVE, DISCLOSURE_LIST, FINANCIAL_STATEMENT};
use super::error::{DartError, DartResult};

/// Default OpenDART API root.
pub const DEFAULT_BASE_URL: &str = "https://opendart.fss.or.kr/api";

/// DART status code for a successful query.
pub const STATUS_OK: &str = "000";

/// Rows requested per disclosure list page (DART's maximum).
pub const DISCLOSURE_PAGE_SIZE: u32 = 100;

/// One record as returned by DART.
pub type Row = Map<String, Value>;

/// A page of the disclosure list.
#[derive(Debug, Clone, Default)]
pub struct DisclosurePage {
    pub rows: Vec<Row>,
    pub page_no: u64,
    pub total_count: u64,
    pub total_page: u64,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    list: Vec<Row>,
    page_no: Option<u64>,
    total_count: Option<u64>,
    total_page: Option<u64>,
}

/// Shared DART client. Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct DartClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl fmt::Debug for DartClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DartClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl DartClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> DartResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let api_key = api_key.filter(|k| !k.trim().is_empty());

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> DartResult<&str> {
        self.api_key.as_deref().ok_or(DartError::MissingApiKey)
    }

    async fn get(&self, resource: &str, params: &[(&str, &str)]) -> DartResult<(u16, Vec<u8>)> {
        let key = self.api_key()?;
        let url = format!("{}/{}", self.base_url, resource);

        debug!(resource, "Sending DART request");

        let response = self
            .http
            .get(&url)
            .query(&[("crtfc_key", key)])
            .query(params)
            .send()
            .await
            .map_err(|e| DartError::Request(e.without_url()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DartError::Request(e.without_url()))?;

        Ok((status, body.to_vec()))
    }

    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> DartResult<Envelope> {
        let (status, body) = self.get(&format!("{}.json", endpoint), params).await?;

        if !(200..300).contains(&status) {
            warn!(endpoint, status, "DART returned a non-success HTTP status");
            return Err(match parse_status_body(&body) {
                Some((code, message)) => DartError::from_status(code, message),
                None => DartError::HttpStatus { status },
            });
        }

        let envelope: Envelope =
            serde_json::from_slice(&body).map_err(|e| DartError::Decode(e.to_string()))?;

        match envelope.status.as_deref() {
            Some(STATUS_OK) => {
                debug!(endpoint, rows = envelope.list.len(), "DART request succeeded");
                Ok(envelope)
            }
            Some(code) => Err(DartError::from_status(code, envelope.message)),
            None => Err(DartError::Decode("response has no status field".to_string())),
        }
    }

    /// Query a regular-report endpoint keyed by company, year and period.
    #[instrument(skip(self, reprt_code), fields(reprt_code = %reprt_code))]
    pub async fn regular_report(
        &self,
        endpoint: &str,
        corp_code: &str,
        bsns_year: &str,
        reprt_code: ReportCode,
    ) -> DartResult<Vec<Row>> {
        let envelope = self
            .get_json(
                endpoint,
                &[
                    ("corp_code", corp_code),
                    ("bsns_year", bsns_year),
                    ("reprt_code", reprt_code.code()),
                ],
            )
            .await?;
        Ok(envelope.list)
    }

    /// Every account of a single company's financial statement.
    pub async fn financial_statement(
        &self,
        corp_code: &str,
        bsns_year: &str,
        reprt_code: ReportCode,
        fs_div: FsDiv,
    ) -> DartResult<Vec<Row>> {
        let envelope = self
            .get_json(
                FINANCIAL_STATEMENT,
                &[
                    ("corp_code", corp_code),
                    ("bsns_year", bsns_year),
                    ("reprt_code", reprt_code.code()),
                    ("fs_div", fs_div.code()),
                ],
            )
            .await?;
        Ok(envelope.list)
    }

    /// Periodic-report disclosures filed between two `YYYYMMDD` dates.
    #[instrument(skip(self))]
    pub async fn disclosure_list(
        &self,
        corp_code: &str,
        start_date: &str,
        end_date: &str,
        page_no: u32,
    ) -> DartResult<DisclosurePage> {
        let page = page_no.to_string();
        let page_count = DISCLOSURE_PAGE_SIZE.to_string();
        let envelope = self
            .get_json(
                DISCLOSURE_LIST,
                &[
                    ("corp_code", corp_code),
                    ("bgn_de", start_date),
                    ("end_de", end_date),
                    ("pblntf_ty", "A"),
                    ("page_no", page.as_str()),
                    ("page_count", page_count.as_str()),
                    ("sort", "date"),
                ],
            )
            .await?;

        let total_count = envelope.total_count.unwrap_or(envelope.list.len() as u64);
        Ok(DisclosurePage {
            page_no: envelope.page_no.unwrap_or(u64::from(page_no)),
            total_count,
            total_page: envelope.total_page.unwrap_or(1),
            rows: envelope.list,
        })
    }

    /// Download and parse the full corporation code registry.
    #[instrument(skip(self))]
    pub async fn fetch_corp_codes(&self) -> DartResult<Vec<CorpRecord>> {
        let (status, body) = self.get(CORP_CODE_ARCHIVE, &[]).await?;

        if !(200..300).contains(&status) {
            return Err(match parse_status_body(&body) {
                Some((code, message)) => DartError::from_status(code, message),
                None => DartError::HttpStatus { status },
            });
        }

        debug!(bytes = body.len(), "Downloaded corporation code archive");
        let xml = extract_corp_code_xml(&body)?;
        let records = parse_corp_code_xml(&xml)?;
        debug!(records = records.len(), "Parsed corporation codes");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::dart::corp_code::tests::{SAMPLE_XML, zipped};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, key: Option<&str>) -> DartClient {
        DartClient::new(format!("{}/api", server.uri()), key.map(str::to_string)).unwrap()
    }

    #[tokio::test]
    async fn test_regular_report_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/alotMatter.json"))
            .and(query_param("crtfc_key", "test-key"))
            .and(query_param("corp_code", "00126380"))
            .and(query_param("bsns_year", "2023"))
            .and(query_param("reprt_code", "11011"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "000",
                "message": "정상",
                "list": [{"se": "주당액면가액(원)", "thstrm": "100"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let rows = client_for(&server, Some("test-key"))
            .regular_report("alotMatter", "00126380", "2023", ReportCode::Annual)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["thstrm"], "100");
    }

    #[tokio::test]
    async fn test_no_data_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/fnlttSinglAcntAll.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "013",
                "message": "조회된 데이타가 없습니다."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("test-key"))
            .financial_statement("00126380", "2023", ReportCode::Annual, FsDiv::Consolidated)
            .await
            .unwrap_err();
        assert!(err.is_no_data());
    }

    #[tokio::test]
    async fn test_invalid_key_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "010",
                "message": "등록되지 않은 키입니다."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("bad-key"))
            .regular_report("empSttus", "00126380", "2023", ReportCode::Annual)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "DART API error 010: 등록되지 않은 키입니다.");
    }

    #[tokio::test]
    async fn test_non_success_http_status_with_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "status": "800",
                "message": "시스템 점검으로 인한 서비스가 중지 중입니다."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("test-key"))
            .regular_report("empSttus", "00126380", "2023", ReportCode::Annual)
            .await
            .unwrap_err();
        assert!(matches!(err, DartError::Api { ref status, .. } if status == "800"));
    }

    #[tokio::test]
    async fn test_non_success_http_status_without_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("test-key"))
            .regular_report("empSttus", "00126380", "2023", ReportCode::Annual)
            .await
            .unwrap_err();
        assert!(matches!(err, DartError::HttpStatus { status: 502 }));
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("   "));
        assert!(!client.has_api_key());
        let err = client
            .regular_report("empSttus", "00126380", "2023", ReportCode::Annual)
            .await
            .unwrap_err();
        assert!(matches!(err, DartError::MissingApiKey));
        let err = client.fetch_corp_codes().await.unwrap_err();
        assert!(matches!(err, DartError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_disclosure_list_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/list.json"))
            .and(query_param("pblntf_ty", "A"))
            .and(query_param("page_count", "100"))
            .and(query_param("page_no", "2"))
            .and(query_param("bgn_de", "20230101"))
            .and(query_param("end_de", "20231231"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "000",
                "message": "정상",
                "page_no": 2,
                "page_count": 100,
                "total_count": 101,
                "total_page": 2,
                "list": [{"rcept_no": "20230314001234", "report_nm": "사업보고서"}]
            })))
            .mount(&server)
            .await;

        let page = client_for(&server, Some("test-key"))
            .disclosure_list("00126380", "20230101", "20231231", 2)
            .await
            .unwrap();
        assert_eq!(page.page_no, 2);
        assert_eq!(page.total_count, 101);
        assert_eq!(page.total_page, 2);
        assert_eq!(page.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_corp_codes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/corpCode.xml"))
            .and(query_param("crtfc_key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(zipped("CORPCODE.xml", SAMPLE_XML))
                    .insert_header("content-type", "application/zip"),
            )
            .mount(&server)
            .await;

        let records = client_for(&server, Some("test-key"))
            .fetch_corp_codes()
            .await
            .unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = DartClient::new(DEFAULT_BASE_URL, Some("secret-value".to_string())).unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
