//! Synchronous (blocking) AWS client.
//!
//! This module is only available when the `blocking` feature is enabled.
//! It mirrors the async [`crate::aws::Client`] operations by driving the
//! async [`crate::aws::AwsClient`] on a runtime it owns.
//!
//! Do not use it from inside an async context: `block_on` panics when called
//! on a thread that is already running a tokio runtime.
//!
//! # Example
//!
//! ```no_run
//! use aws_provider::blocking::AwsClient;
//! use aws_sdk_sts::operation::get_caller_identity::GetCallerIdentityInput;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AwsClient::new("default", "us-east-1", "")?;
//!     let identity = client.get_caller_identity(GetCallerIdentityInput::builder().build()?)?;
//!     println!("Account: {:?}", identity.account());
//!     Ok(())
//! }
//! ```

use tokio::runtime::Runtime;

use aws_sdk_iam::operation::attach_user_policy::{
    AttachUserPolicyError, AttachUserPolicyInput, AttachUserPolicyOutput,
};
use aws_sdk_iam::operation::create_access_key::{
    CreateAccessKeyError, CreateAccessKeyInput, CreateAccessKeyOutput,
};
use aws_sdk_iam::operation::create_user::{CreateUserError, CreateUserInput, CreateUserOutput};
use aws_sdk_iam::operation::delete_access_key::{
    DeleteAccessKeyError, DeleteAccessKeyInput, DeleteAccessKeyOutput,
};
use aws_sdk_iam::operation::get_user::{GetUserError, GetUserInput, GetUserOutput};
use aws_sdk_iam::operation::list_access_keys::{
    ListAccessKeysError, ListAccessKeysInput, ListAccessKeysOutput,
};
use aws_sdk_iam::operation::list_users::{ListUsersError, ListUsersInput, ListUsersOutput};
use aws_sdk_s3::operation::delete_bucket::{DeleteBucketError, DeleteBucketInput, DeleteBucketOutput};
use aws_sdk_s3::operation::delete_objects::{
    DeleteObjectsError, DeleteObjectsInput, DeleteObjectsOutput,
};
use aws_sdk_s3::operation::list_buckets::{ListBucketsError, ListBucketsInput, ListBucketsOutput};
use aws_sdk_s3::operation::list_objects::{ListObjectsError, ListObjectsInput, ListObjectsOutput};
use aws_sdk_sts::operation::assume_role::{AssumeRoleError, AssumeRoleInput, AssumeRoleOutput};
use aws_sdk_sts::operation::get_caller_identity::{
    GetCallerIdentityError, GetCallerIdentityInput, GetCallerIdentityOutput,
};
use aws_sdk_sts::operation::get_federation_token::{
    GetFederationTokenError, GetFederationTokenInput, GetFederationTokenOutput,
};

use crate::aws::{AwsClientInput, Client, OperationResult};
use crate::error::{Error, Result};

/// Synchronous client over IAM, STS and S3.
pub struct AwsClient {
    inner: crate::aws::AwsClient,
    runtime: Runtime,
}

impl AwsClient {
    /// Creates a blocking client with credentials from the environment.
    ///
    /// See [`crate::aws::AwsClient::new`].
    pub fn new(profile: &str, region: &str, config_file: &str) -> Result<Self> {
        let runtime = build_runtime()?;
        let inner = runtime.block_on(crate::aws::AwsClient::new(profile, region, config_file))?;
        Ok(Self { inner, runtime })
    }

    /// Creates a blocking client with explicitly supplied credentials.
    pub fn with_input(input: &AwsClientInput) -> Result<Self> {
        let runtime = build_runtime()?;
        let inner = runtime.block_on(crate::aws::AwsClient::with_input(input))?;
        Ok(Self { inner, runtime })
    }

    /// Wraps an existing async client.
    pub fn from_async(inner: crate::aws::AwsClient) -> Result<Self> {
        Ok(Self {
            inner,
            runtime: build_runtime()?,
        })
    }

    /// Returns the region the session resolved.
    pub fn region(&self) -> Option<&str> {
        self.inner.region()
    }

    pub fn assume_role(
        &self,
        input: AssumeRoleInput,
    ) -> OperationResult<AssumeRoleOutput, AssumeRoleError> {
        self.runtime.block_on(self.inner.assume_role(input))
    }

    pub fn get_caller_identity(
        &self,
        input: GetCallerIdentityInput,
    ) -> OperationResult<GetCallerIdentityOutput, GetCallerIdentityError> {
        self.runtime.block_on(self.inner.get_caller_identity(input))
    }

    pub fn get_federation_token(
        &self,
        input: GetFederationTokenInput,
    ) -> OperationResult<GetFederationTokenOutput, GetFederationTokenError> {
        self.runtime.block_on(self.inner.get_federation_token(input))
    }

    pub fn list_buckets(
        &self,
        input: ListBucketsInput,
    ) -> OperationResult<ListBucketsOutput, ListBucketsError> {
        self.runtime.block_on(self.inner.list_buckets(input))
    }

    pub fn delete_bucket(
        &self,
        input: DeleteBucketInput,
    ) -> OperationResult<DeleteBucketOutput, DeleteBucketError> {
        self.runtime.block_on(self.inner.delete_bucket(input))
    }

    pub fn list_objects(
        &self,
        input: ListObjectsInput,
    ) -> OperationResult<ListObjectsOutput, ListObjectsError> {
        self.runtime.block_on(self.inner.list_objects(input))
    }

    pub fn delete_objects(
        &self,
        input: DeleteObjectsInput,
    ) -> OperationResult<DeleteObjectsOutput, DeleteObjectsError> {
        self.runtime.block_on(self.inner.delete_objects(input))
    }

    pub fn create_access_key(
        &self,
        input: CreateAccessKeyInput,
    ) -> OperationResult<CreateAccessKeyOutput, CreateAccessKeyError> {
        self.runtime.block_on(self.inner.create_access_key(input))
    }

    pub fn delete_access_key(
        &self,
        input: DeleteAccessKeyInput,
    ) -> OperationResult<DeleteAccessKeyOutput, DeleteAccessKeyError> {
        self.runtime.block_on(self.inner.delete_access_key(input))
    }

    pub fn list_access_keys(
        &self,
        input: ListAccessKeysInput,
    ) -> OperationResult<ListAccessKeysOutput, ListAccessKeysError> {
        self.runtime.block_on(self.inner.list_access_keys(input))
    }

    pub fn get_user(&self, input: GetUserInput) -> OperationResult<GetUserOutput, GetUserError> {
        self.runtime.block_on(self.inner.get_user(input))
    }

    pub fn create_user(
        &self,
        input: CreateUserInput,
    ) -> OperationResult<CreateUserOutput, CreateUserError> {
        self.runtime.block_on(self.inner.create_user(input))
    }

    pub fn list_users(
        &self,
        input: ListUsersInput,
    ) -> OperationResult<ListUsersOutput, ListUsersError> {
        self.runtime.block_on(self.inner.list_users(input))
    }

    pub fn attach_user_policy(
        &self,
        input: AttachUserPolicyInput,
    ) -> OperationResult<AttachUserPolicyOutput, AttachUserPolicyError> {
        self.runtime.block_on(self.inner.attach_user_policy(input))
    }
}

fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)
}
