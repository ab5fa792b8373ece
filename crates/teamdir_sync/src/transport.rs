//! Transport layer abstraction for sync operations.

use crate::error::SyncResult;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use teamdir_core::Member;

/// The stored file and its version token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Version token (blob sha).
    pub sha: String,
    /// Base64 content as returned by the provider, possibly wrapped.
    pub content: String,
}

/// Outcome of reading the stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResponse {
    /// The file exists.
    Found(RemoteFile),
    /// The file does not exist yet.
    NotFound,
    /// Any other non-success status.
    Failed {
        /// HTTP status code.
        status: u16,
        /// Provider message.
        message: String,
    },
}

/// A whole-file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    /// Commit message.
    pub message: String,
    /// Base64 encoded file content.
    pub content: String,
    /// Version token of the file being replaced; `None` creates it.
    pub sha: Option<String>,
}

/// Outcome of a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResponse {
    /// The write was accepted.
    Written,
    /// The version token was stale.
    Conflict {
        /// Provider message.
        message: String,
    },
    /// Any other non-success status.
    Failed {
        /// HTTP status code.
        status: u16,
        /// Provider message.
        message: String,
    },
}

/// Reads and writes the stored file.
///
/// Status failures are reported in the response; `Err` is reserved for
/// transport faults where no response arrived.
#[async_trait]
pub trait ContentsTransport: Send + Sync {
    /// Reads the stored file.
    async fn read(&self) -> SyncResult<ReadResponse>;

    /// Replaces the stored file.
    async fn write(&self, request: &WriteRequest) -> SyncResult<WriteResponse>;
}

/// Sends the whole collection to the local write endpoint.
#[async_trait]
pub trait LocalTransport: Send + Sync {
    /// Posts the collection. Rejections are returned as [`crate::SyncError::Local`].
    async fn post_members(&self, members: &[Member]) -> SyncResult<()>;
}

/// A mock contents transport for testing.
///
/// Queued responses are consumed in order. When the read queue is empty the
/// fallback response is returned; when the write queue is empty writes
/// succeed.
#[derive(Debug)]
pub struct MockTransport {
    reads: Mutex<VecDeque<SyncResult<ReadResponse>>>,
    read_fallback: Mutex<ReadResponse>,
    writes: Mutex<VecDeque<SyncResult<WriteResponse>>>,
    written: Mutex<Vec<WriteRequest>>,
    read_count: Mutex<usize>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Creates a mock whose file does not exist.
    pub fn new() -> Self {
        Self {
            reads: Mutex::new(VecDeque::new()),
            read_fallback: Mutex::new(ReadResponse::NotFound),
            writes: Mutex::new(VecDeque::new()),
            written: Mutex::new(Vec::new()),
            read_count: Mutex::new(0),
        }
    }

    /// Creates a mock holding a file.
    pub fn with_file(sha: impl Into<String>, content: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.set_file(sha, content);
        mock
    }

    /// Sets the file returned once queued reads run out.
    pub fn set_file(&self, sha: impl Into<String>, content: impl Into<String>) {
        *self.read_fallback.lock() = ReadResponse::Found(RemoteFile {
            sha: sha.into(),
            content: content.into(),
        });
    }

    /// Sets the response returned once queued reads run out.
    pub fn set_read_fallback(&self, response: ReadResponse) {
        *self.read_fallback.lock() = response;
    }

    /// Queues a read outcome.
    pub fn push_read(&self, response: SyncResult<ReadResponse>) {
        self.reads.lock().push_back(response);
    }

    /// Queues a write outcome.
    pub fn push_write(&self, response: SyncResult<WriteResponse>) {
        self.writes.lock().push_back(response);
    }

    /// Returns every write request received.
    pub fn written(&self) -> Vec<WriteRequest> {
        self.written.lock().clone()
    }

    /// Returns the number of writes received.
    pub fn write_count(&self) -> usize {
        self.written.lock().len()
    }

    /// Returns the number of reads received.
    pub fn read_count(&self) -> usize {
        *self.read_count.lock()
    }
}

#[async_trait]
impl ContentsTransport for MockTransport {
    async fn read(&self) -> SyncResult<ReadResponse> {
        *self.read_count.lock() += 1;
        let queued = self.reads.lock().pop_front();
        match queued {
            Some(response) => response,
            None => Ok(self.read_fallback.lock().clone()),
        }
    }

    async fn write(&self, request: &WriteRequest) -> SyncResult<WriteResponse> {
        self.written.lock().push(request.clone());
        self.writes
            .lock()
            .pop_front()
            .unwrap_or(Ok(WriteResponse::Written))
    }
}

/// A mock local endpoint for testing.
#[derive(Debug, Default)]
pub struct MockLocalTransport {
    outcomes: Mutex<VecDeque<SyncResult<()>>>,
    posted: Mutex<Vec<Vec<Member>>>,
}

impl MockLocalTransport {
    /// Creates a mock that accepts every post.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the outcome of the next post.
    pub fn push_outcome(&self, outcome: SyncResult<()>) {
        self.outcomes.lock().push_back(outcome);
    }

    /// Returns every collection posted.
    pub fn posted(&self) -> Vec<Vec<Member>> {
        self.posted.lock().clone()
    }
}

#[async_trait]
impl LocalTransport for MockLocalTransport {
    async fn post_members(&self, members: &[Member]) -> SyncResult<()> {
        self.posted.lock().push(members.to_vec());
        self.outcomes.lock().pop_front().unwrap_or(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;

    #[tokio::test]
    async fn mock_read_queue_then_fallback() {
        let mock = MockTransport::with_file("abc", "W10=");
        mock.push_read(Ok(ReadResponse::NotFound));
        mock.push_read(Err(SyncError::transport_retryable("reset")));

        assert_eq!(mock.read().await.unwrap(), ReadResponse::NotFound);
        assert!(mock.read().await.is_err());
        assert!(matches!(
            mock.read().await.unwrap(),
            ReadResponse::Found(RemoteFile { ref sha, .. }) if sha == "abc"
        ));
        assert_eq!(mock.read_count(), 3);
    }

    #[tokio::test]
    async fn mock_records_writes() {
        let mock = MockTransport::new();
        mock.push_write(Ok(WriteResponse::Conflict {
            message: "stale".into(),
        }));
        let request = WriteRequest {
            message: "m".into(),
            content: "W10=".into(),
            sha: None,
        };

        assert!(matches!(
            mock.write(&request).await.unwrap(),
            WriteResponse::Conflict { .. }
        ));
        assert_eq!(mock.write(&request).await.unwrap(), WriteResponse::Written);
        assert_eq!(mock.write_count(), 2);
        assert_eq!(mock.written()[0], request);
    }

    #[tokio::test]
    async fn mock_local_records_posts() {
        let mock = MockLocalTransport::new();
        mock.push_outcome(Err(SyncError::Local("Local save failed".into())));
        assert!(mock.post_members(&[]).await.is_err());
        assert!(mock.post_members(&[]).await.is_ok());
        assert_eq!(mock.posted().len(), 2);
    }
}
