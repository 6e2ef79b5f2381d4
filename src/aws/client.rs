//! Unified AWS client facade

use async_trait::async_trait;
use std::sync::Arc;

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

use crate::aws::credentials::AwsClientInput;
use crate::aws::services::{IamApi, OperationResult, S3Api, StsApi};
use crate::aws::session::{Session, SessionOptions};
use crate::error::Result;

/// Account, role and bucket operations available through one client
#[async_trait]
pub trait Client: Send + Sync {
    // sts
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

    // s3
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

    // iam
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

/// Client backed by the IAM, STS and S3 SDK clients of one session
#[derive(Clone)]
pub struct AwsClient {
    iam_client: Arc<dyn IamApi>,
    sts_client: Arc<dyn StsApi>,
    s3_client: Arc<dyn S3Api>,
    region: Option<String>,
}

impl AwsClient {
    /// Create a client with credentials from the environment.
    ///
    /// Uses the named `profile` and, when `config_file` is not empty, that
    /// shared config file instead of the default ones. Credentials are
    /// resolved once up front so a misconfigured source fails here rather
    /// than on the first call.
    pub async fn new(profile: &str, region: &str, config_file: &str) -> Result<Self> {
        let options = SessionOptions::new(profile, region, config_file)?;
        tracing::debug!(
            "Creating AWS session: profile={:?}, region={:?}, config_file={:?}",
            options.profile,
            options.region,
            options.config_file
        );

        let session = Session::from_options(&options).await;

        if let Err(e) = session.resolve_credentials().await {
            tracing::warn!("Credential resolution failed: {}", e);
            return Err(e);
        }

        Ok(Self::from_session(&session))
    }

    /// Create a client with explicitly supplied credentials
    pub async fn with_input(input: &AwsClientInput) -> Result<Self> {
        tracing::debug!(
            "Creating AWS session from static credentials: region={}, endpoint={:?}",
            input.region,
            input.endpoint_url
        );

        let session = Session::from_input(input).await;
        Ok(Self::from_session(&session))
    }

    /// Create a client from an already loaded session
    pub fn from_session(session: &Session) -> Self {
        let client = Self {
            iam_client: Arc::new(session.iam_client()),
            sts_client: Arc::new(session.sts_client()),
            s3_client: Arc::new(session.s3_client()),
            region: session.region().map(|r| r.to_string()),
        };

        tracing::info!("AWS client ready, region={:?}", client.region);
        client
    }

    /// Create a client from arbitrary sub-client implementations
    pub fn from_services(
        iam_client: Arc<dyn IamApi>,
        sts_client: Arc<dyn StsApi>,
        s3_client: Arc<dyn S3Api>,
    ) -> Self {
        Self {
            iam_client,
            sts_client,
            s3_client,
            region: None,
        }
    }

    /// Get the region the session resolved
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

#[async_trait]
impl Client for AwsClient {
    async fn assume_role(
        &self,
        input: AssumeRoleInput,
    ) -> OperationResult<AssumeRoleOutput, AssumeRoleError> {
        self.sts_client.assume_role(input).await
    }

    async fn get_caller_identity(
        &self,
        input: GetCallerIdentityInput,
    ) -> OperationResult<GetCallerIdentityOutput, GetCallerIdentityError> {
        self.sts_client.get_caller_identity(input).await
    }

    async fn get_federation_token(
        &self,
        input: GetFederationTokenInput,
    ) -> OperationResult<GetFederationTokenOutput, GetFederationTokenError> {
        self.sts_client.get_federation_token(input).await
    }

    async fn list_buckets(
        &self,
        input: ListBucketsInput,
    ) -> OperationResult<ListBucketsOutput, ListBucketsError> {
        self.s3_client.list_buckets(input).await
    }

    async fn delete_bucket(
        &self,
        input: DeleteBucketInput,
    ) -> OperationResult<DeleteBucketOutput, DeleteBucketError> {
        self.s3_client.delete_bucket(input).await
    }

    async fn list_objects(
        &self,
        input: ListObjectsInput,
    ) -> OperationResult<ListObjectsOutput, ListObjectsError> {
        self.s3_client.list_objects(input).await
    }

    async fn delete_objects(
        &self,
        input: DeleteObjectsInput,
    ) -> OperationResult<DeleteObjectsOutput, DeleteObjectsError> {
        self.s3_client.delete_objects(input).await
    }

    async fn create_access_key(
        &self,
        input: CreateAccessKeyInput,
    ) -> OperationResult<CreateAccessKeyOutput, CreateAccessKeyError> {
        self.iam_client.create_access_key(input).await
    }

    async fn delete_access_key(
        &self,
        input: DeleteAccessKeyInput,
    ) -> OperationResult<DeleteAccessKeyOutput, DeleteAccessKeyError> {
        self.iam_client.delete_access_key(input).await
    }

    async fn list_access_keys(
        &self,
        input: ListAccessKeysInput,
    ) -> OperationResult<ListAccessKeysOutput, ListAccessKeysError> {
        self.iam_client.list_access_keys(input).await
    }

    async fn get_user(&self, input: GetUserInput) -> OperationResult<GetUserOutput, GetUserError> {
        self.iam_client.get_user(input).await
    }

    async fn create_user(
        &self,
        input: CreateUserInput,
    ) -> OperationResult<CreateUserOutput, CreateUserError> {
        self.iam_client.create_user(input).await
    }

    async fn list_users(
        &self,
        input: ListUsersInput,
    ) -> OperationResult<ListUsersOutput, ListUsersError> {
        self.iam_client.list_users(input).await
    }

    async fn attach_user_policy(
        &self,
        input: AttachUserPolicyInput,
    ) -> OperationResult<AttachUserPolicyOutput, AttachUserPolicyError> {
        self.iam_client.attach_user_policy(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::services::{MockIamApi, MockS3Api, MockStsApi};
    use aws_sdk_iam::types::error::{EntityAlreadyExistsException, NoSuchEntityException};
    use aws_sdk_s3::types::error::NoSuchBucket;
    use aws_sdk_s3::types::{Bucket, Delete, ObjectIdentifier};
    use aws_sdk_sts::types::error::MalformedPolicyDocumentException;
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::client::result::SdkError;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;
    use std::error::Error as _;

    fn raw_response(status: u16) -> HttpResponse {
        HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    fn client_with(iam: MockIamApi, sts: MockStsApi, s3: MockS3Api) -> AwsClient {
        AwsClient::from_services(Arc::new(iam), Arc::new(sts), Arc::new(s3))
    }

    fn sts_client(sts: MockStsApi) -> AwsClient {
        client_with(MockIamApi::new(), sts, MockS3Api::new())
    }

    fn s3_client(s3: MockS3Api) -> AwsClient {
        client_with(MockIamApi::new(), MockStsApi::new(), s3)
    }

    fn iam_client(iam: MockIamApi) -> AwsClient {
        client_with(iam, MockStsApi::new(), MockS3Api::new())
    }

    fn assert_construction_failure<E>(err: SdkError<E, HttpResponse>, message: &str)
    where
        E: std::error::Error + 'static,
    {
        assert!(matches!(err, SdkError::ConstructionFailure(_)), "unexpected error: {:?}", err);
        assert_eq!(err.source().unwrap().to_string(), message);
    }

    // STS

    #[tokio::test]
    async fn test_assume_role_forwards_input_and_output() {
        let mut sts = MockStsApi::new();
        sts.expect_assume_role()
            .withf(|input| {
                input.role_arn.as_deref() == Some("arn:aws:iam::123456789012:role/deployer")
                    && input.role_session_name.as_deref() == Some("ci")
                    && input.duration_seconds == Some(900)
            })
            .times(1)
            .returning(|_| Ok(AssumeRoleOutput::builder().packed_policy_size(42).build()));

        let input = AssumeRoleInput::builder()
            .role_arn("arn:aws:iam::123456789012:role/deployer")
            .role_session_name("ci")
            .duration_seconds(900)
            .build()
            .unwrap();

        let output = sts_client(sts).assume_role(input).await.unwrap();
        assert_eq!(output, AssumeRoleOutput::builder().packed_policy_size(42).build());
    }

    #[tokio::test]
    async fn test_assume_role_service_error_unchanged() {
        let mut sts = MockStsApi::new();
        sts.expect_assume_role().returning(|_| {
            Err(SdkError::service_error(
                AssumeRoleError::MalformedPolicyDocumentException(
                    MalformedPolicyDocumentException::builder()
                        .message("bad policy")
                        .build(),
                ),
                raw_response(400),
            ))
        });

        let input = AssumeRoleInput::builder().build().unwrap();
        let err = sts_client(sts).assume_role(input).await.unwrap_err();

        let service_err = err.as_service_error().expect("service error");
        assert!(service_err.is_malformed_policy_document_exception());
        assert_eq!(err.raw_response().unwrap().status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_get_caller_identity_output_unchanged() {
        let expected = GetCallerIdentityOutput::builder()
            .account("123456789012")
            .arn("arn:aws:iam::123456789012:user/alice")
            .user_id("AIDAEXAMPLE")
            .build();

        let mut sts = MockStsApi::new();
        let response = expected.clone();
        sts.expect_get_caller_identity()
            .times(1)
            .returning(move |_| Ok(response.clone()));

        let input = GetCallerIdentityInput::builder().build().unwrap();
        let output = sts_client(sts).get_caller_identity(input).await.unwrap();
        assert_eq!(output, expected);
    }

    #[tokio::test]
    async fn test_get_federation_token_error_unchanged() {
        let mut sts = MockStsApi::new();
        sts.expect_get_federation_token()
            .withf(|input| input.name.as_deref() == Some("bob"))
            .returning(|_| Err(SdkError::construction_failure("federation refused")));

        let input = GetFederationTokenInput::builder().name("bob").build().unwrap();
        let err = sts_client(sts).get_federation_token(input).await.unwrap_err();
        assert_construction_failure(err, "federation refused");
    }

    // S3

    #[tokio::test]
    async fn test_list_buckets_output_unchanged() {
        let expected = ListBucketsOutput::builder()
            .buckets(Bucket::builder().name("logs").build())
            .buckets(Bucket::builder().name("backups").build())
            .build();

        let mut s3 = MockS3Api::new();
        let response = expected.clone();
        s3.expect_list_buckets()
            .times(1)
            .returning(move |_| Ok(response.clone()));

        let output = s3_client(s3)
            .list_buckets(ListBucketsInput::builder().build().unwrap())
            .await
            .unwrap();

        assert_eq!(output, expected);
        assert_eq!(output.buckets().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_bucket_forwards_bucket_name() {
        let mut s3 = MockS3Api::new();
        s3.expect_delete_bucket()
            .withf(|input| input.bucket.as_deref() == Some("old-bucket"))
            .times(1)
            .returning(|_| Ok(DeleteBucketOutput::builder().build()));

        let input = DeleteBucketInput::builder().bucket("old-bucket").build().unwrap();
        let output = s3_client(s3).delete_bucket(input).await.unwrap();
        assert_eq!(output, DeleteBucketOutput::builder().build());
    }

    #[tokio::test]
    async fn test_list_objects_service_error_unchanged() {
        let mut s3 = MockS3Api::new();
        s3.expect_list_objects().returning(|_| {
            Err(SdkError::service_error(
                ListObjectsError::NoSuchBucket(NoSuchBucket::builder().message("gone").build()),
                raw_response(404),
            ))
        });

        let input = ListObjectsInput::builder()
            .bucket("missing")
            .prefix("docs/")
            .build()
            .unwrap();
        let err = s3_client(s3).list_objects(input).await.unwrap_err();

        assert!(err.as_service_error().unwrap().is_no_such_bucket());
        assert_eq!(err.raw_response().unwrap().status().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_list_objects_output_unchanged() {
        let expected = ListObjectsOutput::builder()
            .name("data")
            .prefix("docs/")
            .is_truncated(false)
            .build();

        let mut s3 = MockS3Api::new();
        let response = expected.clone();
        s3.expect_list_objects()
            .withf(|input| {
                input.bucket.as_deref() == Some("data") && input.prefix.as_deref() == Some("docs/")
            })
            .returning(move |_| Ok(response.clone()));

        let input = ListObjectsInput::builder()
            .bucket("data")
            .prefix("docs/")
            .build()
            .unwrap();
        assert_eq!(s3_client(s3).list_objects(input).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_delete_objects_forwards_delete_request() {
        let mut s3 = MockS3Api::new();
        s3.expect_delete_objects()
            .withf(|input| {
                input.bucket.as_deref() == Some("data")
                    && input
                        .delete
                        .as_ref()
                        .map(|d| d.objects().len() == 2)
                        .unwrap_or(false)
            })
            .times(1)
            .returning(|_| Ok(DeleteObjectsOutput::builder().build()));

        let delete = Delete::builder()
            .objects(ObjectIdentifier::builder().key("a.txt").build().unwrap())
            .objects(ObjectIdentifier::builder().key("b.txt").build().unwrap())
            .build()
            .unwrap();
        let input = DeleteObjectsInput::builder()
            .bucket("data")
            .delete(delete)
            .build()
            .unwrap();

        let output = s3_client(s3).delete_objects(input).await.unwrap();
        assert!(output.deleted().is_empty());
    }

    // IAM

    #[tokio::test]
    async fn test_create_access_key_error_unchanged() {
        let mut iam = MockIamApi::new();
        iam.expect_create_access_key()
            .withf(|input| input.user_name.as_deref() == Some("alice"))
            .returning(|_| Err(SdkError::construction_failure("quota exceeded")));

        let input = CreateAccessKeyInput::builder().user_name("alice").build().unwrap();
        let err = iam_client(iam).create_access_key(input).await.unwrap_err();
        assert_construction_failure(err, "quota exceeded");
    }

    #[tokio::test]
    async fn test_delete_access_key_forwards_input() {
        let mut iam = MockIamApi::new();
        iam.expect_delete_access_key()
            .withf(|input| {
                input.user_name.as_deref() == Some("alice")
                    && input.access_key_id.as_deref() == Some("AKIDEXAMPLE")
            })
            .times(1)
            .returning(|_| Ok(DeleteAccessKeyOutput::builder().build()));

        let input = DeleteAccessKeyInput::builder()
            .user_name("alice")
            .access_key_id("AKIDEXAMPLE")
            .build()
            .unwrap();
        let output = iam_client(iam).delete_access_key(input).await.unwrap();
        assert_eq!(output, DeleteAccessKeyOutput::builder().build());
    }

    #[tokio::test]
    async fn test_list_access_keys_error_unchanged() {
        let mut iam = MockIamApi::new();
        iam.expect_list_access_keys()
            .withf(|input| input.max_items == Some(10))
            .returning(|_| Err(SdkError::construction_failure("throttled")));

        let input = ListAccessKeysInput::builder().max_items(10).build().unwrap();
        let err = iam_client(iam).list_access_keys(input).await.unwrap_err();
        assert_construction_failure(err, "throttled");
    }

    #[tokio::test]
    async fn test_get_user_service_error_unchanged() {
        let mut iam = MockIamApi::new();
        iam.expect_get_user().returning(|_| {
            Err(SdkError::service_error(
                GetUserError::NoSuchEntityException(
                    NoSuchEntityException::builder().message("no user bob").build(),
                ),
                raw_response(404),
            ))
        });

        let input = GetUserInput::builder().user_name("bob").build().unwrap();
        let err = iam_client(iam).get_user(input).await.unwrap_err();

        let service_err = err.as_service_error().unwrap();
        assert!(service_err.is_no_such_entity_exception());
    }

    #[tokio::test]
    async fn test_create_user_service_error_unchanged() {
        let mut iam = MockIamApi::new();
        iam.expect_create_user()
            .withf(|input| {
                input.user_name.as_deref() == Some("carol") && input.path.as_deref() == Some("/ops/")
            })
            .returning(|_| {
                Err(SdkError::service_error(
                    CreateUserError::EntityAlreadyExistsException(
                        EntityAlreadyExistsException::builder().message("exists").build(),
                    ),
                    raw_response(409),
                ))
            });

        let input = CreateUserInput::builder()
            .user_name("carol")
            .path("/ops/")
            .build()
            .unwrap();
        let err = iam_client(iam).create_user(input).await.unwrap_err();
        assert!(err.as_service_error().unwrap().is_entity_already_exists_exception());
    }

    #[tokio::test]
    async fn test_list_users_error_unchanged() {
        let mut iam = MockIamApi::new();
        iam.expect_list_users()
            .withf(|input| input.path_prefix.as_deref() == Some("/ops/"))
            .returning(|_| Err(SdkError::construction_failure("listing denied")));

        let input = ListUsersInput::builder().path_prefix("/ops/").build().unwrap();
        let err = iam_client(iam).list_users(input).await.unwrap_err();
        assert_construction_failure(err, "listing denied");
    }

    #[tokio::test]
    async fn test_attach_user_policy_forwards_input() {
        let mut iam = MockIamApi::new();
        iam.expect_attach_user_policy()
            .withf(|input| {
                input.user_name.as_deref() == Some("carol")
                    && input.policy_arn.as_deref()
                        == Some("arn:aws:iam::aws:policy/ReadOnlyAccess")
            })
            .times(1)
            .returning(|_| Ok(AttachUserPolicyOutput::builder().build()));

        let input = AttachUserPolicyInput::builder()
            .user_name("carol")
            .policy_arn("arn:aws:iam::aws:policy/ReadOnlyAccess")
            .build()
            .unwrap();
        let output = iam_client(iam).attach_user_policy(input).await.unwrap();
        assert_eq!(output, AttachUserPolicyOutput::builder().build());
    }

    #[tokio::test]
    async fn test_calls_only_reach_their_own_service() {
        // Mocks without expectations panic if called
        let mut s3 = MockS3Api::new();
        s3.expect_delete_bucket()
            .times(1)
            .returning(|_| Ok(DeleteBucketOutput::builder().build()));

        let client = s3_client(s3);
        let input = DeleteBucketInput::builder().bucket("b").build().unwrap();
        client.delete_bucket(input).await.unwrap();
        assert!(client.region().is_none());
    }

    #[tokio::test]
    async fn test_with_input_builds_client() {
        let input = AwsClientInput::new("AKIDEXAMPLE", "secret", "token", "eu-central-1");
        let client = AwsClient::with_input(&input).await.unwrap();
        assert_eq!(client.region(), Some("eu-central-1"));
    }
}
