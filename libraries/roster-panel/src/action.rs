//! User actions and the attribute encoding rendered buttons carry.

use crate::message::MessageId;
use crate::view::Element;
use thiserror::Error;

/// Something the user asked the panel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reload the user list
    Reload,
    /// Open the detail surface for a user
    View(i64),
    /// Delete (deactivate) a user
    Delete(i64),
    /// Close the detail surface
    CloseDetail,
    /// Submit the create form with its current inputs
    Submit,
    /// Remove a message before it expires
    Dismiss(MessageId),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("Unknown action: {0}")]
    Unknown(String),

    #[error("Action {action} requires a {attr} attribute")]
    MissingTarget { action: String, attr: &'static str },

    #[error("Invalid {attr} value: {value}")]
    InvalidTarget { attr: &'static str, value: String },
}

impl Action {
    /// Value of the `data-action` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Reload => "reload",
            Action::View(_) => "view",
            Action::Delete(_) => "delete",
            Action::CloseDetail => "close-detail",
            Action::Submit => "submit",
            Action::Dismiss(_) => "dismiss",
        }
    }

    /// Attributes to put on the element that triggers this action.
    pub fn attrs(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("data-action", self.name().to_string())];
        match self {
            Action::View(id) | Action::Delete(id) => attrs.push(("data-user-id", id.to_string())),
            Action::Dismiss(id) => attrs.push(("data-message-id", id.0.to_string())),
            Action::Reload | Action::CloseDetail | Action::Submit => {}
        }
        attrs
    }

    /// Rebuild an action from a rendered element's attributes.
    pub fn from_attrs<'a>(
        get: impl Fn(&str) -> Option<&'a str>,
    ) -> Result<Self, ActionParseError> {
        let name = get("data-action").unwrap_or_default();
        match name {
            "reload" => Ok(Action::Reload),
            "close-detail" => Ok(Action::CloseDetail),
            "submit" => Ok(Action::Submit),
            "view" => target(name, "data-user-id", &get).map(Action::View),
            "delete" => target(name, "data-user-id", &get).map(Action::Delete),
            "dismiss" => {
                let id = target(name, "data-message-id", &get)?;
                u64::try_from(id)
                    .map(|id| Action::Dismiss(MessageId(id)))
                    .map_err(|_| ActionParseError::InvalidTarget {
                        attr: "data-message-id",
                        value: id.to_string(),
                    })
            }
            other => Err(ActionParseError::Unknown(other.to_string())),
        }
    }

    pub fn from_element(el: &Element) -> Result<Self, ActionParseError> {
        Self::from_attrs(|name: &str| el.get_attr(name))
    }
}

fn target<'a>(
    action: &str,
    attr: &'static str,
    get: &impl Fn(&str) -> Option<&'a str>,
) -> Result<i64, ActionParseError> {
    let raw = get(attr).ok_or_else(|| ActionParseError::MissingTarget {
        action: action.to_string(),
        attr,
    })?;
    raw.parse().map_err(|_| ActionParseError::InvalidTarget {
        attr,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(attrs: &'a [(&'static str, String)]) -> impl Fn(&str) -> Option<&'a str> {
        move |name: &str| {
            attrs
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str())
        }
    }

    #[test]
    fn test_attrs_round_trip_through_parse() {
        for action in [
            Action::Reload,
            Action::View(12),
            Action::Delete(3),
            Action::CloseDetail,
            Action::Submit,
            Action::Dismiss(MessageId(7)),
        ] {
            let attrs = action.attrs();
            assert_eq!(Action::from_attrs(lookup(&attrs)), Ok(action));
        }
    }

    #[test]
    fn test_unknown_action() {
        let attrs = vec![("data-action", "explode".to_string())];
        assert_eq!(
            Action::from_attrs(lookup(&attrs)),
            Err(ActionParseError::Unknown("explode".to_string()))
        );
    }

    #[test]
    fn test_missing_and_bad_target() {
        let attrs = vec![("data-action", "view".to_string())];
        assert!(matches!(
            Action::from_attrs(lookup(&attrs)),
            Err(ActionParseError::MissingTarget { .. })
        ));

        let attrs = vec![
            ("data-action", "delete".to_string()),
            ("data-user-id", "abc".to_string()),
        ];
        assert!(matches!(
            Action::from_attrs(lookup(&attrs)),
            Err(ActionParseError::InvalidTarget { .. })
        ));

        let attrs = vec![
            ("data-action", "dismiss".to_string()),
            ("data-message-id", "-1".to_string()),
        ];
        assert!(matches!(
            Action::from_attrs(lookup(&attrs)),
            Err(ActionParseError::InvalidTarget { .. })
        ));
    }
}
