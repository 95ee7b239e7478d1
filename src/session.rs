//! Which popups are open. The page carries this state in its URL
//! (`/?popups=Physics,task-3`), so every link and form knows how to get back
//! to the same set of panels.

use serde::Deserialize;

use crate::models::RowId;
use crate::subjects::{self, Subject};

const DAY_FORM_TOKEN: &str = "day";
const TASK_FORM_PREFIX: &str = "task-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Subject(&'static Subject),
    AddDay,
    AddTask { day_id: RowId },
}

impl Popup {
    fn parse(token: &str) -> Option<Self> {
        if token == DAY_FORM_TOKEN {
            return Some(Self::AddDay);
        }
        if let Some(id) = token.strip_prefix(TASK_FORM_PREFIX) {
            return id.parse().ok().map(|day_id| Self::AddTask { day_id });
        }
        subjects::find(token).map(Self::Subject)
    }

    fn token(&self) -> String {
        match self {
            Self::Subject(subject) => subject.key.to_owned(),
            Self::AddDay => DAY_FORM_TOKEN.to_owned(),
            Self::AddTask { day_id } => format!("{TASK_FORM_PREFIX}{day_id}"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    #[serde(default)]
    pub popups: String,
}

/// The open popups, in the order they were opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiSession {
    popups: Vec<Popup>,
}

impl UiSession {
    /// Unknown tokens are dropped, so anything echoed back through a form
    /// only ever names real popups.
    pub fn from_query(raw: &str) -> Self {
        let popups = raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter_map(Popup::parse)
            .collect();
        Self { popups }
    }

    pub fn to_query(&self) -> String {
        self.popups
            .iter()
            .map(Popup::token)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn href(&self) -> String {
        if self.popups.is_empty() {
            "/".to_owned()
        } else {
            format!("/?popups={}", self.to_query())
        }
    }

    pub fn popups(&self) -> &[Popup] {
        &self.popups
    }

    pub fn overlay_visible(&self) -> bool {
        !self.popups.is_empty()
    }

    pub fn with(&self, popup: Popup) -> Self {
        let mut next = self.clone();
        next.popups.push(popup);
        next
    }

    pub fn without(&self, index: usize) -> Self {
        let mut next = self.clone();
        if index < next.popups.len() {
            next.popups.remove(index);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tokens_and_drops_the_rest() {
        let session = UiSession::from_query("Physics, day ,task-12,bogus,task-x,,CS");
        assert_eq!(
            session.popups(),
            &[
                Popup::Subject(subjects::find("Physics").unwrap()),
                Popup::AddDay,
                Popup::AddTask { day_id: 12 },
                Popup::Subject(subjects::find("CS").unwrap()),
            ]
        );
        assert_eq!(session.to_query(), "Physics,day,task-12,CS");
    }

    #[test]
    fn empty_session_links_home_without_overlay() {
        let session = UiSession::from_query("");
        assert!(!session.overlay_visible());
        assert_eq!(session.href(), "/");
    }

    #[test]
    fn closing_one_popup_keeps_the_others() {
        let session = UiSession::default()
            .with(Popup::Subject(subjects::find("English").unwrap()))
            .with(Popup::AddDay);
        assert!(session.overlay_visible());
        assert_eq!(session.href(), "/?popups=English,day");

        let closed = session.without(0);
        assert_eq!(closed.popups(), &[Popup::AddDay]);
        assert_eq!(session.without(5), session);
        assert_eq!(UiSession::from_query(&session.to_query()), session);
    }
}
