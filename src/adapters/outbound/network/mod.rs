mod http_findings_api;

pub use http_findings_api::HttpFindingsApi;
