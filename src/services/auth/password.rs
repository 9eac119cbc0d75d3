use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::AuthService;
use super::otp::{self, OtpCheck};
use crate::middlewares::RequireJWT;
use crate::models::auth::requests::{
    ChangePasswordRequest, ForgotPasswordRequest, ResetPasswordRequest,
};
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

const FORGOT_MESSAGE: &str = "If the e-mail is registered, a one-time code has been sent";

fn internal_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        message,
    ))
}

/// Same answer whether or not the address is known
pub async fn handle_forgot_password(
    service: &AuthService,
    forgot_request: ForgotPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let email = forgot_request.email.trim().to_lowercase();
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_email(&email).await {
        Ok(user) => user,
        Err(e) => return Ok(internal_error(format!("Password reset failed: {e}"))),
    };

    match user {
        Some(user) if user.is_active() => {
            let config = service.get_config();
            let cache = service.get_cache(request);
            let code = otp::issue(
                cache.as_ref(),
                &email,
                &config.otp,
                chrono::Utc::now().timestamp(),
            )
            .await;

            let mailer = service.get_mailer(request);
            let subject = format!("{} password reset code", config.app.system_name);
            let body = format!(
                "Hello {},\n\nYour password reset code is {}. It expires in {} minutes.\n\n\
                 If you did not ask for a reset, ignore this message.\n",
                user.full_name(),
                code,
                (config.otp.ttl_secs / 60).max(1)
            );
            actix_web::rt::spawn(async move {
                if let Err(e) = mailer.send(&user.email, &subject, body).await {
                    warn!("Failed to mail reset code to {}: {}", user.email, e);
                }
            });
        }
        Some(user) => {
            info!("Password reset requested for {} account {}", user.status, user.username)
        }
        None => info!("Password reset requested for unknown e-mail"),
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(FORGOT_MESSAGE)))
}

pub async fn handle_reset_password(
    service: &AuthService,
    reset_request: ResetPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_password_simple(&reset_request.new_password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordPolicyViolation,
            msg,
        )));
    }

    let config = service.get_config();
    let email = reset_request.email.trim().to_lowercase();
    let cache = service.get_cache(request);
    match otp::check(
        cache.as_ref(),
        &email,
        &reset_request.otp,
        &config.otp,
        chrono::Utc::now().timestamp(),
    )
    .await
    {
        OtpCheck::Valid => {}
        OtpCheck::Invalid => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::OtpInvalid,
                "The code is incorrect",
            )));
        }
        OtpCheck::Expired => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::OtpExpired,
                "The code has expired, please request a new one",
            )));
        }
    }

    let storage = service.get_storage(request);
    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::OtpInvalid,
                "The code is incorrect",
            )));
        }
        Err(e) => return Ok(internal_error(format!("Password reset failed: {e}"))),
    };

    set_password(
        service,
        request,
        user.id,
        &reset_request.new_password,
        "Password has been reset",
    )
    .await
}

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(internal_error(format!("Password change failed: {e}"))),
    };

    if !verify_password(&change_request.old_password, &user.password_hash) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Current password is incorrect",
        )));
    }

    if let Err(msg) = validate_password_simple(&change_request.new_password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordPolicyViolation,
            msg,
        )));
    }

    set_password(service, request, user.id, &change_request.new_password, "Password changed").await
}

async fn set_password(
    service: &AuthService,
    request: &HttpRequest,
    user_id: i64,
    new_password: &str,
    success_message: &str,
) -> ActixResult<HttpResponse> {
    let password_hash = match hash_password(new_password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error(format!("Password hashing failed: {e}"))),
    };

    let update = UpdateUserRequest {
        password: Some(password_hash),
        ..Default::default()
    };
    match service.get_storage(request).update_user(user_id, update).await {
        Ok(Some(user)) => {
            info!("Password updated for {}", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(success_message)))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(internal_error(format!("Password update failed: {e}"))),
    }
}
