// Copyright (C) 2020-2026 Andy Kurnia.

pub struct MyError {
    s: String,
}

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for MyError {}

pub fn new(s: String) -> MyError {
    MyError { s }
}

pub type BoxAnyError = Box<dyn std::error::Error + Send + Sync>;
pub type Returns<T> = Result<T, BoxAnyError>;

// precondition failures are caller bugs, rule violations are not errors.
#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}

#[cfg(test)]
mod tests {
    fn fails(x: i32) -> super::Returns<i32> {
        if x < 0 {
            return_error!(format!("negative {}", x));
        }
        Ok(x)
    }

    #[test]
    fn return_error_carries_message() {
        assert_eq!(fails(3).unwrap(), 3);
        let err = fails(-2).unwrap_err();
        assert_eq!(err.to_string(), "negative -2");
    }
}
