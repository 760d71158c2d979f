//! AwsCliStore against a scripted stand-in for the `aws` CLI
//!
//! The script is run through `sh`, answers a fixed set of subcommands and
//! appends every invocation to a log file.

#![cfg(unix)]

use logsweep_aws::AwsCliStore;
use logsweep_domain::{LogGroup, LogStore, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCRIPT: &str = r#"
echo "$*" >> "$(dirname "$0")/calls.log"
case "$2" in
  describe-log-groups)
    echo '{"logGroups":[{"logGroupName":"old","storedBytes":700},{"logGroupName":"fresh","storedBytes":300},{"logGroupName":"broken"}]}'
    ;;
  describe-log-streams)
    case "$4" in
      old) echo '{"logStreams":[{"logStreamName":"a","lastEventTimestamp":1000000000000},{"logStreamName":"b"}]}' ;;
      fresh) echo '{"logStreams":[]}' ;;
      *) echo 'this is not json' ;;
    esac
    ;;
  delete-log-group)
    ;;
  delete-log-stream)
    echo "An error occurred (ResourceNotFoundException) when calling the DeleteLogStream operation" >&2
    exit 254
    ;;
  *)
    echo "usage: aws [options] <command> <subcommand>" >&2
    exit 2
    ;;
esac
"#;

struct FakeCli {
    dir: TempDir,
    script: PathBuf,
}

impl FakeCli {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("aws.sh");
        fs::write(&script, SCRIPT).unwrap();
        Self { dir, script }
    }

    fn store(&self) -> AwsCliStore {
        AwsCliStore::new()
            .with_program("sh")
            .with_leading_args([self.script.as_os_str()])
    }

    fn calls(&self) -> Vec<String> {
        read_lines(&self.dir.path().join("calls.log"))
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_list_log_groups() {
    let cli = FakeCli::new();
    let mut store = cli.store();

    let groups = store.list_log_groups().unwrap();

    assert_eq!(
        groups,
        vec![
            LogGroup::new("old", 700),
            LogGroup::new("fresh", 300),
            LogGroup::new("broken", 0),
        ]
    );
    assert_eq!(cli.calls(), vec!["logs describe-log-groups --output json"]);
}

#[test]
fn test_list_log_streams_requests_newest_first() {
    let cli = FakeCli::new();
    let mut store = cli.store().with_region("us-east-1");

    let streams = store.list_log_streams("old").unwrap();

    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].last_event_timestamp, Some(1_000_000_000_000));
    assert_eq!(streams[1].last_event_timestamp, None);
    assert_eq!(
        cli.calls(),
        vec![
            "logs describe-log-streams --log-group-name old --order-by LastEventTime \
             --descending --output json --region us-east-1"
        ]
    );
}

#[test]
fn test_undecodable_output_is_unexpected() {
    let cli = FakeCli::new();
    let mut store = cli.store();

    let err = store.list_log_streams("broken").unwrap_err();
    assert!(matches!(err, StoreError::Unexpected(_)));
}

#[test]
fn test_delete_log_group() {
    let cli = FakeCli::new();
    let mut store = cli.store();

    store.delete_log_group("old").unwrap();
    assert_eq!(
        cli.calls(),
        vec!["logs delete-log-group --log-group-name old --output json"]
    );
}

#[test]
fn test_non_zero_exit_is_reported() {
    let cli = FakeCli::new();
    let mut store = cli.store();

    let err = store.delete_log_stream("old", "a").unwrap_err();
    match err {
        StoreError::Reported { code, message } => {
            assert_eq!(code, 254);
            assert!(message.contains("ResourceNotFoundException"));
        }
        other => panic!("expected reported failure, got {other:?}"),
    }
}
