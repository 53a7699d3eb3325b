use custom_error::custom_error;

custom_error! {
///! Custom error for request values rejected by the domain types.
#[derive(PartialEq)]
pub MalformedInput
    Blank = "must not be blank",
    TooLong{max: usize, length: usize} = "must be at most {max} characters (got {length})",
    InvalidEmail{email: String} = "`{email}` is not a valid email address",
}
