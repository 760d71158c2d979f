//! JSON shapes returned by `aws logs`

use logsweep_domain::{LogGroup, LogStream};
use serde::Deserialize;

/// Output of `aws logs describe-log-groups`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeLogGroups {
    pub log_groups: Vec<WireLogGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireLogGroup {
    pub log_group_name: String,
    #[serde(default)]
    pub stored_bytes: u64,
}

/// Output of `aws logs describe-log-streams`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeLogStreams {
    pub log_streams: Vec<WireLogStream>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireLogStream {
    pub log_stream_name: String,
    #[serde(default)]
    pub last_event_timestamp: Option<i64>,
}

impl From<WireLogGroup> for LogGroup {
    fn from(group: WireLogGroup) -> Self {
        LogGroup::new(group.log_group_name, group.stored_bytes)
    }
}

impl From<WireLogStream> for LogStream {
    fn from(stream: WireLogStream) -> Self {
        LogStream {
            name: stream.log_stream_name,
            last_event_timestamp: stream.last_event_timestamp,
        }
    }
}
