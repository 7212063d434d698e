use std::sync::Arc;

use crate::account::{AddAccount, AddAccountModel, EmailValidator};
use crate::error::SignupError;
use crate::http::{HttpRequest, HttpResponse, bad_request, created, server_error};

/// Fields a signup body must carry, in checking order.
pub const REQUIRED_FIELDS: [&str; 4] =
    ["name", "email", "password", "passwordConfirmation"];

/// Signup form fields, borrowed from the request body.
#[derive(Debug, PartialEq)]
struct SignupForm<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Validate signup forms and delegate account creation.
#[derive(Clone)]
pub struct SignupController {
    email_validator: Arc<dyn EmailValidator>,
    add_account: Arc<dyn AddAccount>,
    echo_account: bool,
}

impl SignupController {
    /// Create a new [`SignupController`].
    ///
    /// Created accounts are echoed on success by default.
    pub fn new(
        email_validator: Arc<dyn EmailValidator>,
        add_account: Arc<dyn AddAccount>,
    ) -> Self {
        Self {
            email_validator,
            add_account,
            echo_account: true,
        }
    }

    /// Whether the created account is sent back, or an empty object.
    pub fn echo_account(mut self, echo: bool) -> Self {
        self.echo_account = echo;
        self
    }

    /// Handle a signup request.
    ///
    /// Checks stop at the first failure:
    /// 1. every field of [`REQUIRED_FIELDS`] is present and non-empty;
    /// 2. `password` equals `passwordConfirmation`;
    /// 3. `email` is accepted by the [`EmailValidator`].
    ///
    /// Collaborator errors become a `500` without details.
    pub async fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let form = match validate_form(request) {
            Ok(form) => form,
            Err(err) => return bad_request(err),
        };

        match self.email_validator.is_valid(form.email) {
            Ok(true) => {},
            Ok(false) => {
                return bad_request(SignupError::InvalidParam("email".into()));
            },
            Err(err) => {
                tracing::error!(error = %err, "email validator failed");
                return server_error();
            },
        }

        let account = match self
            .add_account
            .add(AddAccountModel {
                name: form.name.to_owned(),
                email: form.email.to_owned(),
                password: form.password.to_owned(),
            })
            .await
        {
            Ok(account) => account,
            Err(err) => {
                tracing::error!(error = %err, "account creation failed");
                return server_error();
            },
        };

        if !self.echo_account {
            return created(serde_json::json!({}));
        }

        match serde_json::to_value(&account) {
            Ok(payload) => created(payload),
            Err(err) => {
                tracing::error!(error = %err, "created account cannot be serialized");
                server_error()
            },
        }
    }
}

/// Local checks, without collaborators.
fn validate_form(request: &HttpRequest) -> Result<SignupForm<'_>, SignupError> {
    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .find(|field| request.field(field).is_none())
    {
        return Err(SignupError::MissingParam((*missing).to_owned()));
    }

    let field = |name: &str| request.field(name).unwrap_or_default();

    if field("password") != field("passwordConfirmation") {
        return Err(SignupError::InvalidParam("passwordConfirmation".into()));
    }

    Ok(SignupForm {
        name: field("name"),
        email: field("email"),
        password: field("password"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountModel;
    use crate::error::BoxError;
    use crate::http::ResponseBody;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct EmailValidatorStub {
        answer: Option<bool>,
        calls: AtomicUsize,
        received: Mutex<Vec<String>>,
    }

    impl EmailValidatorStub {
        fn answering(answer: bool) -> Self {
            Self {
                answer: Some(answer),
                ..Default::default()
            }
        }

        /// Fails on every call.
        fn failing() -> Self {
            Self::default()
        }
    }

    impl EmailValidator for EmailValidatorStub {
        fn is_valid(&self, email: &str) -> Result<bool, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.received.lock().unwrap().push(email.to_owned());
            self.answer.ok_or_else(|| "validator unavailable".into())
        }
    }

    #[derive(Default)]
    struct AddAccountStub {
        fail: bool,
        calls: AtomicUsize,
        received: Mutex<Option<AddAccountModel>>,
    }

    #[async_trait]
    impl AddAccount for AddAccountStub {
        async fn add(
            &self,
            account: AddAccountModel,
        ) -> Result<AccountModel, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.received.lock().unwrap() = Some(account);

            if self.fail {
                return Err("database unreachable".into());
            }

            Ok(AccountModel {
                id: "valid_id".into(),
                name: "valid_name".into(),
                email: "valid_email@email.com".into(),
                password: "valid_password".into(),
            })
        }
    }

    struct Sut {
        sut: SignupController,
        email_validator: Arc<EmailValidatorStub>,
        add_account: Arc<AddAccountStub>,
    }

    fn make_sut(email_validator: EmailValidatorStub, add_account: AddAccountStub) -> Sut {
        let email_validator = Arc::new(email_validator);
        let add_account = Arc::new(add_account);
        let sut = SignupController::new(email_validator.clone(), add_account.clone());

        Sut {
            sut,
            email_validator,
            add_account,
        }
    }

    fn valid_request() -> HttpRequest {
        HttpRequest::new([
            ("name", "any_name"),
            ("email", "any_email@email.com"),
            ("password", "any_password"),
            ("passwordConfirmation", "any_password"),
        ])
    }

    fn error_body(response: &HttpResponse) -> &SignupError {
        match &response.body {
            ResponseBody::Error(err) => err,
            ResponseBody::Success(body) => panic!("unexpected success body {body}"),
        }
    }

    #[tokio::test]
    async fn test_missing_fields() {
        for field in REQUIRED_FIELDS {
            let Sut { sut, email_validator, .. } =
                make_sut(EmailValidatorStub::answering(true), AddAccountStub::default());

            let mut request = valid_request();
            request.body.remove(field);
            let response = sut.handle(&request).await;

            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(error_body(&response), &SignupError::MissingParam(field.into()));
            assert_eq!(email_validator.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_empty_field_is_missing() {
        let Sut { sut, .. } =
            make_sut(EmailValidatorStub::answering(true), AddAccountStub::default());

        let mut request = valid_request();
        request.body.insert("email".into(), String::new());
        let response = sut.handle(&request).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(error_body(&response), &SignupError::MissingParam("email".into()));
    }

    #[tokio::test]
    async fn test_first_missing_field_wins() {
        let Sut { sut, .. } =
            make_sut(EmailValidatorStub::answering(true), AddAccountStub::default());

        let response = sut.handle(&HttpRequest::new([("password", "a")])).await;

        assert_eq!(error_body(&response), &SignupError::MissingParam("name".into()));
    }

    #[tokio::test]
    async fn test_password_confirmation_mismatch() {
        let Sut { sut, email_validator, add_account } =
            make_sut(EmailValidatorStub::answering(true), AddAccountStub::default());

        let mut request = valid_request();
        request.body.insert("password".into(), "a".into());
        request.body.insert("passwordConfirmation".into(), "b".into());
        let response = sut.handle(&request).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error_body(&response),
            &SignupError::InvalidParam("passwordConfirmation".into())
        );
        assert_eq!(email_validator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(add_account.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let Sut { sut, add_account, .. } =
            make_sut(EmailValidatorStub::answering(false), AddAccountStub::default());

        let response = sut.handle(&valid_request()).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(error_body(&response), &SignupError::InvalidParam("email".into()));
        assert_eq!(add_account.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_email_validator_receives_email() {
        let Sut { sut, email_validator, .. } =
            make_sut(EmailValidatorStub::answering(true), AddAccountStub::default());

        sut.handle(&valid_request()).await;

        assert_eq!(email_validator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *email_validator.received.lock().unwrap(),
            vec!["any_email@email.com".to_owned()]
        );
    }

    #[tokio::test]
    async fn test_email_validator_failure() {
        let Sut { sut, add_account, .. } =
            make_sut(EmailValidatorStub::failing(), AddAccountStub::default());

        let response = sut.handle(&valid_request()).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_body(&response), &SignupError::Server);
        assert_eq!(error_body(&response).param(), None);
        assert_eq!(add_account.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_add_account_failure() {
        let Sut { sut, .. } = make_sut(
            EmailValidatorStub::answering(true),
            AddAccountStub {
                fail: true,
                ..Default::default()
            },
        );

        let response = sut.handle(&valid_request()).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_body(&response), &SignupError::Server);
    }

    #[tokio::test]
    async fn test_add_account_receives_form() {
        let Sut { sut, add_account, .. } =
            make_sut(EmailValidatorStub::answering(true), AddAccountStub::default());

        sut.handle(&valid_request()).await;

        assert_eq!(add_account.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *add_account.received.lock().unwrap(),
            Some(AddAccountModel {
                name: "any_name".into(),
                email: "any_email@email.com".into(),
                password: "any_password".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_signup_success() {
        let Sut { sut, .. } =
            make_sut(EmailValidatorStub::answering(true), AddAccountStub::default());

        let response = sut.handle(&valid_request()).await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(
            response.body,
            ResponseBody::Success(json!({
                "id": "valid_id",
                "name": "valid_name",
                "email": "valid_email@email.com",
            }))
        );
    }

    #[tokio::test]
    async fn test_signup_success_without_echo() {
        let Sut { sut, .. } =
            make_sut(EmailValidatorStub::answering(true), AddAccountStub::default());

        let response = sut.echo_account(false).handle(&valid_request()).await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, ResponseBody::Success(json!({})));
    }
}
