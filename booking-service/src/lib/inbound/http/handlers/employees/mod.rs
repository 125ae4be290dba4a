use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::principal::models::Employee;

pub mod delete_employee;
pub mod get_employee;
pub mod list_employees;

/// Employee representation exposed over HTTP.
///
/// Deliberately omits the stored hash and salt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeData {
    pub id: i32,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub phone_number: String,
    pub working_role: String,
    pub gender: String,
    pub login: String,
    pub working_time: Option<String>,
}

impl From<&Employee> for EmployeeData {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            full_name: employee.full_name.clone(),
            date_of_birth: employee.date_of_birth,
            email: employee.email.as_str().to_string(),
            phone_number: employee.phone_number.clone(),
            working_role: employee.working_role.clone(),
            gender: employee.gender.clone(),
            login: employee.login.as_str().to_string(),
            working_time: employee.working_time.clone(),
        }
    }
}
