//! Schema check of user payloads.
//!
//! Every field is checked independently and all failures are reported
//! together, one [`Violation`] per failing field.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    api::Violation,
    db::user::{Id, Role, User},
};

/// Suffix every registered email must end with.
pub const EMAIL_DOMAIN: &str = "@unah.hn";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$",
    )
    .unwrap()
});

/// User payload that passed [`validate_user`], not yet identified.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: u64,
    pub role: Role,
}

impl NewUser {
    pub fn with_id(self, id: Id) -> User {
        User {
            id,
            name: self.name,
            username: self.username,
            email: self.email,
            phone: self.phone,
            role: self.role,
        }
    }
}

/// Validates an arbitrary JSON value against the user schema.
///
/// Unknown keys are ignored and do not reach the returned [`NewUser`].
pub fn validate_user(input: &Value) -> Result<NewUser, Vec<Violation>> {
    let Some(fields) = input.as_object() else {
        return Err(vec![Violation {
            message: format!("Expected object, received {}", kind(input)),
            path: None,
        }]);
    };

    let mut violations = Vec::new();
    let name = check(fields, "name", name, &mut violations);
    let username = check(fields, "username", username, &mut violations);
    let email = check(fields, "email", email, &mut violations);
    let phone = check(fields, "phone", phone, &mut violations);
    let role = check(fields, "role", role, &mut violations);

    match (name, username, email, phone, role) {
        (Some(name), Some(username), Some(email), Some(phone), Some(role)) => {
            Ok(NewUser {
                name,
                username,
                email,
                phone,
                role,
            })
        }
        _ => Err(violations),
    }
}

type Rule<T> = fn(Option<&Value>) -> Result<T, String>;

fn check<T>(
    fields: &Map<String, Value>,
    path: &str,
    rule: Rule<T>,
    violations: &mut Vec<Violation>,
) -> Option<T> {
    rule(fields.get(path))
        .map_err(|message| violations.push(Violation::new(path, message)))
        .ok()
}

fn name(value: Option<&Value>) -> Result<String, String> {
    match value {
        None => Err("El nombre es obligatorio".into()),
        Some(Value::String(s)) => min_len(s, 3).map(|()| s.clone()),
        Some(_) => Err("El nombre debe ser un texto".into()),
    }
}

fn username(value: Option<&Value>) -> Result<String, String> {
    let s = string(value)?;
    min_len(s, 6)?;
    max_len(s, 10)?;
    Ok(s.to_owned())
}

fn email(value: Option<&Value>) -> Result<String, String> {
    let s = string(value)?;
    if s.starts_with('.') || s.contains("..") || !EMAIL_RE.is_match(s) {
        return Err("Invalid email".into());
    }
    if !s.ends_with(EMAIL_DOMAIN) {
        return Err("Debe ser un estudiante de la UNAH".into());
    }
    Ok(s.to_owned())
}

fn phone(value: Option<&Value>) -> Result<u64, String> {
    const NOT_POSITIVE: &str = "Number must be greater than 0";

    let n = match value {
        None => return Err("El teléfono es obligatorio".into()),
        Some(Value::Number(n)) => n,
        Some(_) => return Err("El teléfono debe ser un número".into()),
    };

    if let Some(n) = n.as_u64() {
        return if n == 0 { Err(NOT_POSITIVE.into()) } else { Ok(n) };
    }
    if n.is_i64() {
        return Err(NOT_POSITIVE.into());
    }

    // Remaining numbers are floats, integral ones like `5.0` are accepted.
    let f = n.as_f64().unwrap_or(f64::NAN);
    if !f.is_finite() || f.fract() != 0.0 {
        return Err("Expected integer, received float".into());
    }
    if f <= 0.0 {
        return Err(NOT_POSITIVE.into());
    }
    if f >= u64::MAX as f64 {
        return Err(format!(
            "Number must be less than or equal to {}",
            u64::MAX,
        ));
    }
    Ok(f as u64)
}

fn role(value: Option<&Value>) -> Result<Role, String> {
    let expected = Role::ALL
        .iter()
        .map(|r| format!("'{r}'"))
        .collect::<Vec<_>>()
        .join(" | ");
    match value {
        None => Err("Required".into()),
        Some(Value::String(s)) => s.parse::<Role>().map_err(|_| {
            format!("Invalid enum value. Expected {expected}, received '{s}'")
        }),
        Some(other) => {
            Err(format!("Expected {expected}, received {}", kind(other)))
        }
    }
}

fn string(value: Option<&Value>) -> Result<&str, String> {
    match value {
        None => Err("Required".into()),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(format!("Expected string, received {}", kind(other))),
    }
}

fn min_len(s: &str, min: usize) -> Result<(), String> {
    if s.chars().count() < min {
        return Err(format!("String must contain at least {min} character(s)"));
    }
    Ok(())
}

fn max_len(s: &str, max: usize) -> Result<(), String> {
    if s.chars().count() > max {
        return Err(format!("String must contain at most {max} character(s)"));
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
