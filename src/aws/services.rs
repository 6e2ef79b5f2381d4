//! Per-service sub-clients
//!
//! Each trait mirrors the subset of one SDK client the facade forwards to.
//! The SDK clients implement them directly, copying every input field onto
//! the fluent builder; tests substitute mocks.

use async_trait::async_trait;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_runtime_api::client::result::SdkError;

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

/// Result of a forwarded call: the SDK output or the SDK error, untouched
pub type OperationResult<T, E> = Result<T, SdkError<E, HttpResponse>>;

/// Security token service operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StsApi: Send + Sync {
    async fn assume_role(
        &self,
        input: AssumeRoleInput,
    ) -> OperationResult<AssumeRoleOutput, AssumeRoleError>;

    async fn get_caller_identity(
        &self,
        input: GetCallerIdentityInput,
    ) -> OperationResult<GetCallerIdentityOutput, GetCallerIdentityError>;

    async fn get_federation_token(
        &self,
        input: GetFederationTokenInput,
    ) -> OperationResult<GetFederationTokenOutput, GetFederationTokenError>;
}

/// Object storage operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait S3Api: Send + Sync {
    async fn list_buckets(
        &self,
        input: ListBucketsInput,
    ) -> OperationResult<ListBucketsOutput, ListBucketsError>;

    async fn delete_bucket(
        &self,
        input: DeleteBucketInput,
    ) -> OperationResult<DeleteBucketOutput, DeleteBucketError>;

    async fn list_objects(
        &self,
        input: ListObjectsInput,
    ) -> OperationResult<ListObjectsOutput, ListObjectsError>;

    async fn delete_objects(
        &self,
        input: DeleteObjectsInput,
    ) -> OperationResult<DeleteObjectsOutput, DeleteObjectsError>;
}

/// Identity and access management operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IamApi: Send + Sync {
    async fn create_access_key(
        &self,
        input: CreateAccessKeyInput,
    ) -> OperationResult<CreateAccessKeyOutput, CreateAccessKeyError>;

    async fn delete_access_key(
        &self,
        input: DeleteAccessKeyInput,
    ) -> OperationResult<DeleteAccessKeyOutput, DeleteAccessKeyError>;

    async fn list_access_keys(
        &self,
        input: ListAccessKeysInput,
    ) -> OperationResult<ListAccessKeysOutput, ListAccessKeysError>;

    async fn get_user(&self, input: GetUserInput) -> OperationResult<GetUserOutput, GetUserError>;

    async fn create_user(
        &self,
        input: CreateUserInput,
    ) -> OperationResult<CreateUserOutput, CreateUserError>;

    async fn list_users(
        &self,
        input: ListUsersInput,
    ) -> OperationResult<ListUsersOutput, ListUsersError>;

    async fn attach_user_policy(
        &self,
        input: AttachUserPolicyInput,
    ) -> OperationResult<AttachUserPolicyOutput, AttachUserPolicyError>;
}

// The SDK clients expose zero-argument fluent builders with the same names as
// the trait methods; the fully qualified calls below resolve to those.

#[async_trait]
impl StsApi for aws_sdk_sts::Client {
    async fn assume_role(
        &self,
        input: AssumeRoleInput,
    ) -> OperationResult<AssumeRoleOutput, AssumeRoleError> {
        aws_sdk_sts::Client::assume_role(self)
            .set_role_arn(input.role_arn)
            .set_role_session_name(input.role_session_name)
            .set_policy_arns(input.policy_arns)
            .set_policy(input.policy)
            .set_duration_seconds(input.duration_seconds)
            .set_tags(input.tags)
            .set_transitive_tag_keys(input.transitive_tag_keys)
            .set_external_id(input.external_id)
            .set_serial_number(input.serial_number)
            .set_token_code(input.token_code)
            .set_source_identity(input.source_identity)
            .set_provided_contexts(input.provided_contexts)
            .set_minimum_session_token_size(input.minimum_session_token_size)
            .send()
            .await
    }

    async fn get_caller_identity(
        &self,
        _input: GetCallerIdentityInput,
    ) -> OperationResult<GetCallerIdentityOutput, GetCallerIdentityError> {
        aws_sdk_sts::Client::get_caller_identity(self).send().await
    }

    async fn get_federation_token(
        &self,
        input: GetFederationTokenInput,
    ) -> OperationResult<GetFederationTokenOutput, GetFederationTokenError> {
        aws_sdk_sts::Client::get_federation_token(self)
            .set_name(input.name)
            .set_policy(input.policy)
            .set_policy_arns(input.policy_arns)
            .set_duration_seconds(input.duration_seconds)
            .set_tags(input.tags)
            .set_minimum_session_token_size(input.minimum_session_token_size)
            .send()
            .await
    }
}

#[async_trait]
impl S3Api for aws_sdk_s3::Client {
    async fn list_buckets(
        &self,
        input: ListBucketsInput,
    ) -> OperationResult<ListBucketsOutput, ListBucketsError> {
        aws_sdk_s3::Client::list_buckets(self)
            .set_max_buckets(input.max_buckets)
            .set_continuation_token(input.continuation_token)
            .set_prefix(input.prefix)
            .set_bucket_region(input.bucket_region)
            .send()
            .await
    }

    async fn delete_bucket(
        &self,
        input: DeleteBucketInput,
    ) -> OperationResult<DeleteBucketOutput, DeleteBucketError> {
        aws_sdk_s3::Client::delete_bucket(self)
            .set_bucket(input.bucket)
            .set_expected_bucket_owner(input.expected_bucket_owner)
            .send()
            .await
    }

    async fn list_objects(
        &self,
        input: ListObjectsInput,
    ) -> OperationResult<ListObjectsOutput, ListObjectsError> {
        aws_sdk_s3::Client::list_objects(self)
            .set_bucket(input.bucket)
            .set_delimiter(input.delimiter)
            .set_encoding_type(input.encoding_type)
            .set_marker(input.marker)
            .set_max_keys(input.max_keys)
            .set_prefix(input.prefix)
            .set_request_payer(input.request_payer)
            .set_expected_bucket_owner(input.expected_bucket_owner)
            .set_optional_object_attributes(input.optional_object_attributes)
            .send()
            .await
    }

    async fn delete_objects(
        &self,
        input: DeleteObjectsInput,
    ) -> OperationResult<DeleteObjectsOutput, DeleteObjectsError> {
        aws_sdk_s3::Client::delete_objects(self)
            .set_bucket(input.bucket)
            .set_delete(input.delete)
            .set_mfa(input.mfa)
            .set_request_payer(input.request_payer)
            .set_bypass_governance_retention(input.bypass_governance_retention)
            .set_expected_bucket_owner(input.expected_bucket_owner)
            .set_checksum_algorithm(input.checksum_algorithm)
            .send()
            .await
    }
}

#[async_trait]
impl IamApi for aws_sdk_iam::Client {
    async fn create_access_key(
        &self,
        input: CreateAccessKeyInput,
    ) -> OperationResult<CreateAccessKeyOutput, CreateAccessKeyError> {
        aws_sdk_iam::Client::create_access_key(self)
            .set_user_name(input.user_name)
            .send()
            .await
    }

    async fn delete_access_key(
        &self,
        input: DeleteAccessKeyInput,
    ) -> OperationResult<DeleteAccessKeyOutput, DeleteAccessKeyError> {
        aws_sdk_iam::Client::delete_access_key(self)
            .set_user_name(input.user_name)
            .set_access_key_id(input.access_key_id)
            .send()
            .await
    }

    async fn list_access_keys(
        &self,
        input: ListAccessKeysInput,
    ) -> OperationResult<ListAccessKeysOutput, ListAccessKeysError> {
        aws_sdk_iam::Client::list_access_keys(self)
            .set_user_name(input.user_name)
            .set_marker(input.marker)
            .set_max_items(input.max_items)
            .send()
            .await
    }

    async fn get_user(&self, input: GetUserInput) -> OperationResult<GetUserOutput, GetUserError> {
        aws_sdk_iam::Client::get_user(self)
            .set_user_name(input.user_name)
            .send()
            .await
    }

    async fn create_user(
        &self,
        input: CreateUserInput,
    ) -> OperationResult<CreateUserOutput, CreateUserError> {
        aws_sdk_iam::Client::create_user(self)
            .set_path(input.path)
            .set_user_name(input.user_name)
            .set_permissions_boundary(input.permissions_boundary)
            .set_tags(input.tags)
            .send()
            .await
    }

    async fn list_users(
        &self,
        input: ListUsersInput,
    ) -> OperationResult<ListUsersOutput, ListUsersError> {
        aws_sdk_iam::Client::list_users(self)
            .set_path_prefix(input.path_prefix)
            .set_marker(input.marker)
            .set_max_items(input.max_items)
            .send()
            .await
    }

    async fn attach_user_policy(
        &self,
        input: AttachUserPolicyInput,
    ) -> OperationResult<AttachUserPolicyOutput, AttachUserPolicyError> {
        aws_sdk_iam::Client::attach_user_policy(self)
            .set_user_name(input.user_name)
            .set_policy_arn(input.policy_arn)
            .send()
            .await
    }
}
