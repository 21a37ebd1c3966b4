//! Portal HTTP services

use actix_web::error::ErrorInternalServerError;
use actix_web::http::{StatusCode, header};
use actix_web::web::{self, Data, ServiceConfig};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, Result, get, post};
use askama::Template;
use serde::Deserialize;
use tracing::{error, info};

#[cfg(test)]
mod tests;

mod flash;
mod session;

use crate::context::Context;
use crate::context::login::{Credentials, LoginError};
use crate::context::registration::{Registration, RegistrationError};
use crate::context::sessions::SessionState;
use crate::pages::shell::MENU_OPEN;
use crate::pages::{
    CampusMapPage, Chrome, DashboardPage, HomePage, LoginPage, NotFoundPage, Notification,
    RegisterPage, Shell,
};
use session::SignedIn;

#[derive(Debug, Default, Deserialize)]
struct ShellQuery {
    menu: Option<String>,
}

/// Chrome for the requested page
///
/// Notifications queued by a previous redirect come first, followed by the ones produced while
/// handling this request.
fn chrome(req: &HttpRequest, notifications: Vec<Notification>) -> Chrome {
    let menu_open = web::Query::<ShellQuery>::from_query(req.query_string())
        .map(|query| query.menu.as_deref() == Some(MENU_OPEN))
        .unwrap_or(false);

    let mut queued = flash::read(req);
    queued.extend(notifications);

    Chrome {
        shell: Shell::new(req.path(), menu_open),
        notifications: queued,
    }
}

/// Renders the page, consuming queued notifications
fn render(req: &HttpRequest, status: StatusCode, page: impl Template) -> Result<HttpResponse> {
    let body = page.render().map_err(|err| {
        error!(%err, "Cannot render page");
        ErrorInternalServerError("Cannot render page")
    })?;

    let mut response = HttpResponse::build(status);
    response.content_type("text/html; charset=utf-8");
    if flash::pending(req) {
        response.cookie(flash::removal());
    }

    Ok(response.body(body))
}

/// Redirect queueing a notification for the target page
fn redirect(location: &str, notification: Notification) -> Result<HttpResponseBuilder> {
    let flash = flash::cookie(&[notification]).map_err(internal("Cannot queue notification"))?;

    let mut response = HttpResponse::SeeOther();
    response
        .insert_header((header::LOCATION, location))
        .cookie(flash);
    Ok(response)
}

/// Logs the error, hiding the details from the client
fn internal(message: &'static str) -> impl FnOnce(color_eyre::Report) -> actix_web::Error {
    move |err| {
        error!(?err, "{message}");
        ErrorInternalServerError(message)
    }
}

#[get("/")]
async fn index(req: HttpRequest) -> Result<HttpResponse> {
    render(&req, StatusCode::OK, HomePage::new(chrome(&req, vec![])))
}

#[get("/login")]
async fn login_form(req: HttpRequest) -> Result<HttpResponse> {
    let page = LoginPage {
        chrome: chrome(&req, vec![]),
        email: String::new(),
    };
    render(&req, StatusCode::OK, page)
}

#[post("/login")]
async fn login_submit(
    req: HttpRequest,
    context: Data<Context>,
    form: web::Form<Credentials>,
) -> Result<HttpResponse> {
    let credentials = form.into_inner();

    let verified = context.authenticator().authenticate(&credentials).await;

    let identity = match verified {
        Ok(identity) => identity,
        Err(err) => {
            info!(%err, email = %credentials.email, "Login rejected");
            let (status, description) = match err {
                LoginError::IncompleteSubmission => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "Please fill in all fields")
                }
                LoginError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Invalid email or password")
                }
                LoginError::Unavailable(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Sign-in service is unavailable, please try again",
                ),
            };

            let page = LoginPage {
                chrome: chrome(&req, vec![Notification::error("Login Failed", description)]),
                email: credentials.email,
            };
            return render(&req, status, page);
        }
    };

    let session = context
        .sessions()
        .save(identity)
        .await
        .map_err(internal("Cannot store session"))?;
    info!(identity = %session.identity, "Signed in");

    let response = redirect(
        "/dashboard",
        Notification::success("Login Successful!", "Welcome to SVIT Student Portal"),
    )?
    .cookie(session::cookie(context.cookie(), &session))
    .finish();
    Ok(response)
}

#[get("/register")]
async fn register_form(req: HttpRequest) -> Result<HttpResponse> {
    let page = RegisterPage {
        chrome: chrome(&req, vec![]),
        email: String::new(),
    };
    render(&req, StatusCode::OK, page)
}

#[post("/register")]
async fn register_submit(
    req: HttpRequest,
    context: Data<Context>,
    form: web::Form<Registration>,
) -> Result<HttpResponse> {
    let registration = form.into_inner();

    let err = match registration.register(context.model()).await {
        Ok(_) => {
            let response = redirect(
                session::LOGIN_PATH,
                Notification::success("Registration Successful!", "You can now sign in"),
            )?
            .finish();
            return Ok(response);
        }
        Err(err) => err,
    };

    let (status, description) = match err {
        RegistrationError::IncompleteSubmission => {
            (StatusCode::UNPROCESSABLE_ENTITY, "Please fill in all fields")
        }
        RegistrationError::PasswordMismatch => {
            (StatusCode::UNPROCESSABLE_ENTITY, "Passwords do not match")
        }
        RegistrationError::EmailTaken => (
            StatusCode::CONFLICT,
            "An account with this email already exists",
        ),
        RegistrationError::Unavailable(_) => {
            return Err(ErrorInternalServerError("Cannot register account"));
        }
    };

    let page = RegisterPage {
        chrome: chrome(
            &req,
            vec![Notification::error("Registration Failed", description)],
        ),
        email: registration.email,
    };
    render(&req, status, page)
}

#[get("/dashboard")]
async fn dashboard(req: HttpRequest, signed_in: SignedIn) -> Result<HttpResponse> {
    let SignedIn(session) = signed_in;
    let page = DashboardPage::new(chrome(&req, vec![]), &session.identity);
    render(&req, StatusCode::OK, page)
}

#[post("/logout")]
async fn logout(req: HttpRequest, context: Data<Context>) -> Result<HttpResponse> {
    if let Some(token) = session::token(&req, context.cookie()) {
        context
            .sessions()
            .clear(&token)
            .await
            .map_err(internal("Cannot clear session"))?;
        info!("Signed out");
    }

    let response = redirect(
        "/",
        Notification::success("Logged Out", "You have been successfully logged out"),
    )?
    .cookie(session::removal(context.cookie()))
    .finish();
    Ok(response)
}

#[get("/campus-map")]
async fn campus_map(req: HttpRequest) -> Result<HttpResponse> {
    render(&req, StatusCode::OK, CampusMapPage::new(chrome(&req, vec![])))
}

/// Session of the caller, never redirects
#[get("/api/session")]
async fn api_session(req: HttpRequest, context: Data<Context>) -> Result<HttpResponse> {
    let session = session::current(&req, &context)
        .await
        .map_err(internal("Cannot load session"))?;

    Ok(HttpResponse::Ok().json(SessionState::from(session.as_ref())))
}

async fn not_found(req: HttpRequest) -> Result<HttpResponse> {
    let page = NotFoundPage {
        chrome: chrome(&req, vec![]),
    };
    render(&req, StatusCode::NOT_FOUND, page)
}

/// Returns configuration function for the ActixWeb services
pub fn configure(context: Context) -> impl Fn(&mut ServiceConfig) + Clone {
    move |cfg: &mut ServiceConfig| {
        cfg.app_data(Data::new(context.clone()))
            .service(index)
            .service(login_form)
            .service(login_submit)
            .service(register_form)
            .service(register_submit)
            .service(dashboard)
            .service(logout)
            .service(campus_map)
            .service(api_session)
            .default_service(web::to(not_found));
    }
}
