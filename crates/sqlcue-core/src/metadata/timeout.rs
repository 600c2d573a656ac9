//! Timeout enforcement for metadata clients

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use super::{FieldDescriptor, FieldRequest, HdfsListing, MetadataClient, TablesListing};
use crate::dialect::SqlDialect;
use crate::error::MetadataError;

/// Wraps a client and fails any fetch that outlives its timeout
pub struct TimeoutClient<C> {
    inner: C,
    /// Applied to calls that carry no timeout of their own
    default_timeout: Duration,
}

impl<C> TimeoutClient<C> {
    pub fn new(inner: C, default_timeout: Duration) -> Self {
        Self {
            inner,
            default_timeout,
        }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

async fn with_timeout<T>(
    timeout: Duration,
    fetch: impl Future<Output = Result<T, MetadataError>>,
) -> Result<T, MetadataError> {
    match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result,
        Err(_) => Err(MetadataError::Timeout(timeout)),
    }
}

#[async_trait(?Send)]
impl<C: MetadataClient> MetadataClient for TimeoutClient<C> {
    async fn fetch_fields(
        &self,
        request: FieldRequest<'_>,
    ) -> Result<FieldDescriptor, MetadataError> {
        with_timeout(request.timeout, self.inner.fetch_fields(request)).await
    }

    async fn fetch_tables(
        &self,
        dialect: SqlDialect,
        database: &str,
        timeout: Duration,
    ) -> Result<TablesListing, MetadataError> {
        with_timeout(timeout, self.inner.fetch_tables(dialect, database, timeout)).await
    }

    async fn load_databases(&self, dialect: SqlDialect) -> Result<Vec<String>, MetadataError> {
        with_timeout(self.default_timeout, self.inner.load_databases(dialect)).await
    }

    async fn fetch_hdfs_path(
        &self,
        path_parts: &[String],
        timeout: Duration,
    ) -> Result<HdfsListing, MetadataError> {
        with_timeout(timeout, self.inner.fetch_hdfs_path(path_parts, timeout)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::InMemoryCatalog;

    struct SlowClient {
        delay: Duration,
        catalog: InMemoryCatalog,
    }

    #[async_trait(?Send)]
    impl MetadataClient for SlowClient {
        async fn fetch_fields(
            &self,
            request: FieldRequest<'_>,
        ) -> Result<FieldDescriptor, MetadataError> {
            tokio::time::sleep(self.delay).await;
            self.catalog.fetch_fields(request).await
        }

        async fn fetch_tables(
            &self,
            dialect: SqlDialect,
            database: &str,
            timeout: Duration,
        ) -> Result<TablesListing, MetadataError> {
            tokio::time::sleep(self.delay).await;
            self.catalog.fetch_tables(dialect, database, timeout).await
        }

        async fn load_databases(&self, dialect: SqlDialect) -> Result<Vec<String>, MetadataError> {
            tokio::time::sleep(self.delay).await;
            self.catalog.load_databases(dialect).await
        }

        async fn fetch_hdfs_path(
            &self,
            path_parts: &[String],
            timeout: Duration,
        ) -> Result<HdfsListing, MetadataError> {
            tokio::time::sleep(self.delay).await;
            self.catalog.fetch_hdfs_path(path_parts, timeout).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_times_out() {
        let client = TimeoutClient::new(
            SlowClient {
                delay: Duration::from_secs(30),
                catalog: InMemoryCatalog::new(),
            },
            Duration::from_secs(1),
        );

        let result = client.load_databases(SqlDialect::Hive).await;
        assert_eq!(result, Err(MetadataError::Timeout(Duration::from_secs(1))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_fetch_passes_through() {
        let client = TimeoutClient::new(
            SlowClient {
                delay: Duration::from_millis(10),
                catalog: InMemoryCatalog::new(),
            },
            Duration::from_secs(1),
        );

        let databases = client.load_databases(SqlDialect::Hive).await.unwrap();
        assert_eq!(databases, vec!["default".to_string()]);
    }
}
