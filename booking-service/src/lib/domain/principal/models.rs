use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::domain::principal::errors::EmailError;
use crate::domain::principal::errors::LoginError;
use crate::domain::principal::ports::Entity;
use crate::domain::principal::ports::PrincipalEntity;
use crate::domain::principal::ports::ProfileUpdate;
use crate::domain::principal::ports::Registration;

/// Role claim value carried by every client principal.
pub const CLIENT_ROLE: &str = "Client";

/// Login value type
///
/// Ensures login is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login(String);

impl Login {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid login.
    ///
    /// # Errors
    /// * `TooShort` - Login shorter than 3 characters
    /// * `TooLong` - Login longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(login: String) -> Result<Self, LoginError> {
        let login = Self::with_valid_length(login)?;
        let login = Self::with_valid_chars(login)?;
        Ok(Self(login))
    }

    fn with_valid_length(login: String) -> Result<String, LoginError> {
        let length = login.len();
        if length < Self::MIN_LENGTH {
            Err(LoginError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(LoginError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(login)
        }
    }

    fn with_valid_chars(login: String) -> Result<String, LoginError> {
        if login
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(login)
        } else {
            Err(LoginError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The authentication subsystem's view of a client or employee.
///
/// `password_hash` is only ever produced by the password hasher from the
/// plaintext and `salt`; a Principal is never built from a caller-supplied
/// hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i32,
    pub login: String,
    pub password_hash: String,
    pub salt: String,
    pub role: String,
}

/// Ephemeral login/password pair.
///
/// Never persisted; the Debug form redacts the password so the pair can
/// never leak through logging.
#[derive(Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Client aggregate entity.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub email: EmailAddress,
    pub gender: String,
    pub login: Login,
    pub password_hash: String,
    pub salt: String,
    pub row_version: i32,
}

/// Client fields before the store assigns an id.
#[derive(Debug, Clone)]
pub struct ClientDraft {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub email: EmailAddress,
    pub gender: String,
    pub login: Login,
    pub password_hash: String,
    pub salt: String,
}

impl Entity for Client {
    type Draft = ClientDraft;

    fn id(&self) -> i32 {
        self.id
    }
}

impl PrincipalEntity for Client {
    fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            login: self.login.as_str().to_string(),
            password_hash: self.password_hash.clone(),
            salt: self.salt.clone(),
            role: CLIENT_ROLE.to_string(),
        }
    }

    fn set_password(&mut self, password_hash: String, salt: String) {
        self.password_hash = password_hash;
        self.salt = salt;
    }
}

/// Employee aggregate entity.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: i32,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub email: EmailAddress,
    pub phone_number: String,
    pub working_role: String,
    pub gender: String,
    pub login: Login,
    pub password_hash: String,
    pub salt: String,
    pub working_time: Option<String>,
    pub row_version: i32,
}

/// Employee fields before the store assigns an id.
#[derive(Debug, Clone)]
pub struct EmployeeDraft {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub email: EmailAddress,
    pub phone_number: String,
    pub working_role: String,
    pub gender: String,
    pub login: Login,
    pub password_hash: String,
    pub salt: String,
    pub working_time: Option<String>,
}

impl Entity for Employee {
    type Draft = EmployeeDraft;

    fn id(&self) -> i32 {
        self.id
    }
}

impl PrincipalEntity for Employee {
    fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            login: self.login.as_str().to_string(),
            password_hash: self.password_hash.clone(),
            salt: self.salt.clone(),
            role: self.working_role.clone(),
        }
    }

    fn set_password(&mut self, password_hash: String, salt: String) {
        self.password_hash = password_hash;
        self.salt = salt;
    }
}

/// Command to register a new client with validated fields.
#[derive(Clone)]
pub struct RegisterClient {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub email: EmailAddress,
    pub gender: String,
    pub login: Login,
    pub password: String,
}

impl fmt::Debug for RegisterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterClient")
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl Registration for RegisterClient {
    type Entity = Client;

    fn email(&self) -> &str {
        self.email.as_str()
    }

    fn phone_number(&self) -> &str {
        &self.phone_number
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn into_draft(self, password_hash: String, salt: String) -> ClientDraft {
        ClientDraft {
            name: self.name,
            date_of_birth: self.date_of_birth,
            phone_number: self.phone_number,
            email: self.email,
            gender: self.gender,
            login: self.login,
            password_hash,
            salt,
        }
    }
}

/// Command to register a new employee.
///
/// The working role is an explicit input; it becomes the employee's role
/// claim on login.
#[derive(Clone)]
pub struct RegisterEmployee {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub email: EmailAddress,
    pub phone_number: String,
    pub working_role: String,
    pub gender: String,
    pub login: Login,
    pub password: String,
    pub working_time: Option<String>,
}

impl fmt::Debug for RegisterEmployee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterEmployee")
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl Registration for RegisterEmployee {
    type Entity = Employee;

    fn email(&self) -> &str {
        self.email.as_str()
    }

    fn phone_number(&self) -> &str {
        &self.phone_number
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn into_draft(self, password_hash: String, salt: String) -> EmployeeDraft {
        EmployeeDraft {
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            email: self.email,
            phone_number: self.phone_number,
            working_role: self.working_role,
            gender: self.gender,
            login: self.login,
            password_hash,
            salt,
            working_time: self.working_time,
        }
    }
}

/// Command to replace a client's profile.
///
/// Credentials change only when a new password is supplied; the service
/// then regenerates the salt and hash together.
#[derive(Clone)]
pub struct UpdateClientProfile {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub email: EmailAddress,
    pub gender: String,
    pub login: Login,
    pub password: Option<String>,
}

impl fmt::Debug for UpdateClientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateClientProfile")
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl ProfileUpdate for UpdateClientProfile {
    type Entity = Client;

    fn new_password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    fn apply_to(&self, client: &mut Client) {
        client.name = self.name.clone();
        client.date_of_birth = self.date_of_birth;
        client.phone_number = self.phone_number.clone();
        client.email = self.email.clone();
        client.gender = self.gender.clone();
        client.login = self.login.clone();
    }
}
