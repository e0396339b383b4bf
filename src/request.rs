use regex::Regex;

use crate::context::RequestInfo;
use crate::error::{PageError, PageResult};

/// Extract a required query-string parameter.
pub fn get_parameter(request: &RequestInfo, name: &str) -> PageResult<String> {
    match find_parameter(request, name)? {
        Some(value) => Ok(value),
        None => Err(PageError::MissingParameter {
            name: name.to_string(),
        }),
    }
}

/// Extract a query-string parameter, falling back to `default` when absent.
pub fn get_parameter_or(request: &RequestInfo, name: &str, default: &str) -> PageResult<String> {
    Ok(find_parameter(request, name)?.unwrap_or_else(|| default.to_string()))
}

/// Extract a parameter and pass it through a value filter. A filter failure
/// becomes [`PageError::InvalidParameter`]; an absent parameter yields
/// `default`, or [`PageError::MissingParameter`] when no default is given.
pub fn get_parameter_with<T>(
    request: &RequestInfo,
    name: &str,
    default: Option<T>,
    filter: impl Fn(&str) -> Result<T, String>,
) -> PageResult<T> {
    match find_parameter(request, name)? {
        Some(value) => filter(&value).map_err(|_| PageError::InvalidParameter {
            name: name.to_string(),
            value,
        }),
        None => default.ok_or_else(|| PageError::MissingParameter {
            name: name.to_string(),
        }),
    }
}

/// The `yes`/`no` boolean filter for [`get_parameter_with`].
pub fn yes_or_no(value: &str) -> Result<bool, String> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err("expected 'yes' or 'no'".to_string()),
    }
}

fn find_parameter(request: &RequestInfo, name: &str) -> PageResult<Option<String>> {
    // The name is regex-escaped, so the pattern is always valid.
    let pattern = format!("(?:^|&){}=([^&]*)", regex::escape(name));
    let matcher = Regex::new(&pattern).unwrap();
    match matcher.captures(&request.query) {
        Some(captures) => Ok(Some(percent_decode(name, &captures[1])?)),
        None => Ok(None),
    }
}

fn percent_decode(name: &str, value: &str) -> PageResult<String> {
    let invalid = || PageError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let hex = bytes.get(index + 1..index + 3).ok_or_else(invalid)?;
            let hex = std::str::from_utf8(hex).map_err(|_| invalid())?;
            decoded.push(u8::from_str_radix(hex, 16).map_err(|_| invalid())?);
            index += 3;
        } else {
            decoded.push(bytes[index]);
            index += 1;
        }
    }
    String::from_utf8(decoded).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_query(query: &str) -> RequestInfo {
        RequestInfo {
            query: query.to_string(),
            ..RequestInfo::default()
        }
    }

    #[test]
    fn finds_parameters_anywhere_in_the_query() {
        let request = request_with_query("a=1&b=2");
        assert_eq!(get_parameter(&request, "a").unwrap(), "1");
        assert_eq!(get_parameter(&request, "b").unwrap(), "2");
        assert!(matches!(
            get_parameter(&request, "c"),
            Err(PageError::MissingParameter { .. })
        ));
    }

    #[test]
    fn decodes_percent_escapes() {
        let request = request_with_query("path=a%2Fb%20c");
        assert_eq!(get_parameter(&request, "path").unwrap(), "a/b c");

        let request = request_with_query("path=%2");
        assert!(matches!(
            get_parameter(&request, "path"),
            Err(PageError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn filters_convert_values() {
        let request = request_with_query("wide=yes&narrow=maybe");
        assert_eq!(
            get_parameter_with(&request, "wide", None, yes_or_no).unwrap(),
            true
        );
        assert!(matches!(
            get_parameter_with(&request, "narrow", None, yes_or_no),
            Err(PageError::InvalidParameter { .. })
        ));
        assert_eq!(
            get_parameter_with(&request, "absent", Some(false), yes_or_no).unwrap(),
            false
        );
    }
}
