use axum::response::Html;

use super::{csrf_input, layout};
use crate::middleware::session::Flash;

pub fn login_page(csrf_token: &str, flashes: &[Flash]) -> Html<String> {
    let body = format!(
        r#"<div class="card">
            <h1>Log in</h1>
            <form method="post" action="/login">
                {csrf}
                <label for="email">Email</label>
                <input id="email" type="email" name="email" required>
                <label for="password">Password</label>
                <input id="password" type="password" name="password" required>
                <p><button type="submit">Log in</button></p>
            </form>
            <p>No account yet? <a href="/register">Register</a></p>
        </div>"#,
        csrf = csrf_input(csrf_token)
    );
    layout("Log in", None, flashes, &body)
}

pub fn register_page(csrf_token: &str, flashes: &[Flash]) -> Html<String> {
    let body = format!(
        r#"<div class="card">
            <h1>Register</h1>
            <form method="post" action="/register">
                {csrf}
                <label for="email">Email</label>
                <input id="email" type="email" name="email" required>
                <label for="password">Password</label>
                <input id="password" type="password" name="password" required>
                <label for="confirm">Confirm password</label>
                <input id="confirm" type="password" name="confirm" required>
                <p><button type="submit">Create account</button></p>
            </form>
            <p>Already registered? <a href="/login">Log in</a></p>
        </div>"#,
        csrf = csrf_input(csrf_token)
    );
    layout("Register", None, flashes, &body)
}
