//! Embed-style rendering of verdicts for chat delivery.

use serde::{Deserialize, Serialize};
use ward_core::{lookup::Notifier, verdict::BlacklistedVerdict};

pub const NO_RESULTS: &str =
  "No results found for this ID.\n> They are either fine or not yet listed.";

pub const BLACKLISTED_TITLE: &str = ":shield: User Blacklisted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
  Green,
  Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  pub name:     String,
  pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
  pub name:  String,
  pub value: String,
}

/// A rendered message, shaped like a chat embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:       Option<String>,
  pub description: String,
  pub colour:      Colour,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub author:      Option<Author>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub thumbnail:   Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub fields:      Vec<Field>,
}

/// Renders verdicts as [`Message`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageNotifier;

impl Notifier for MessageNotifier {
  type Output = Message;

  fn render_clean(&self) -> Message {
    Message {
      title:       None,
      description: NO_RESULTS.to_string(),
      colour:      Colour::Green,
      author:      None,
      thumbnail:   None,
      fields:      Vec::new(),
    }
  }

  fn render_blacklisted(&self, v: &BlacklistedVerdict) -> Message {
    let id = &v.subject_id;
    Message {
      title:       Some(BLACKLISTED_TITLE.to_string()),
      description: format!(
        "<@{id}> has been seen in {} blacklisted Discords.",
        v.evidence_count
      ),
      colour:      Colour::Red,
      author:      Some(Author {
        name:     v.display_name.clone(),
        icon_url: v.avatar_ref.clone(),
      }),
      thumbnail:   Some(v.avatar_ref.clone()),
      fields:      vec![Field {
        name:  "User Information".to_string(),
        value: format!(
          "> ID: {id}\n> Name: {}\n> Status: {}\n> Type: {}",
          v.display_name,
          capitalize(v.status.as_str()),
          capitalize(v.highest_severity.as_str()),
        ),
      }],
    }
  }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first
      .to_uppercase()
      .chain(chars.flat_map(char::to_lowercase))
      .collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use ward_core::{
    severity::SeverityKind,
    subject::{SubjectId, SubjectStatus},
    verdict::Verdict,
  };

  use super::*;

  #[test]
  fn capitalize_lowers_the_tail() {
    assert_eq!(capitalize("PERM_BLACKLISTED"), "Perm_blacklisted");
    assert_eq!(capitalize("owner"), "Owner");
    assert_eq!(capitalize(""), "");
  }

  #[test]
  fn clean_verdict_renders_no_results() {
    let msg = Verdict::Clean.render(&MessageNotifier);
    assert_eq!(msg.description, NO_RESULTS);
    assert_eq!(msg.colour, Colour::Green);
    assert!(msg.title.is_none());
  }

  #[test]
  fn blacklisted_verdict_renders_user_information() {
    let verdict = Verdict::Blacklisted(BlacklistedVerdict {
      subject_id:       SubjectId::new("987"),
      display_name:     "eve".into(),
      avatar_ref:       "https://cdn.example/eve.png".into(),
      status:           SubjectStatus::PermBlacklisted,
      evidence_count:   3,
      highest_severity: SeverityKind::new("CHEATER"),
    });

    let msg = verdict.render(&MessageNotifier);
    assert_eq!(msg.title.as_deref(), Some(BLACKLISTED_TITLE));
    assert_eq!(msg.description, "<@987> has been seen in 3 blacklisted Discords.");
    assert_eq!(msg.colour, Colour::Red);
    assert_eq!(msg.thumbnail.as_deref(), Some("https://cdn.example/eve.png"));
    assert_eq!(msg.author.as_ref().map(|a| a.name.as_str()), Some("eve"));
    assert_eq!(
      msg.fields[0].value,
      "> ID: 987\n> Name: eve\n> Status: Perm_blacklisted\n> Type: Cheater"
    );
  }
}
