//! Typed taxonomy of push messages carried by MSG frames.
//!
//! The payload is JSON with an integer `t` selecting the message kind. The
//! server emits `t` as a number or as a numeric string, and most other fields
//! are optional in practice, so extraction is deliberately lenient: a missing
//! or oddly-typed id becomes `None` instead of killing the frame.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{LivecastError, Result};

/// Well-known `t` codes.
pub mod code {
    pub const VIEW_COMMENT: i64 = 1;
    pub const THROW_GIFTS: i64 = 2;
    pub const START_VOTE: i64 = 3;
    pub const END_VOTE: i64 = 4;
    pub const CHANGE_SUPPORT_GAUGE: i64 = 5;
    pub const SET_TWITTER_ICON: i64 = 6;
    pub const SET_TELOP: i64 = 8;
    pub const HIDE_TELOP: i64 = 9;
    pub const ADD_GIFT_LOG: i64 = 11;
    pub const START_PERFORMANCE_TIME: i64 = 12;
    pub const START_BRAVO_TIME: i64 = 13;
    pub const FINISH_BRAVO_TIME: i64 = 14;
    pub const RESULT_BRAVO_TIME: i64 = 15;
    pub const SPEAK: i64 = 16;
    pub const FETCH_AVATAR: i64 = 100;
    pub const END_LIVE: i64 = 101;
    pub const VOTE_REFRESH: i64 = 102;
    pub const RELOAD_VIDEO: i64 = 103;
    pub const START_LIVE: i64 = 104;
    pub const VIEW_COMMENT_OLD: i64 = 301;
    pub const ENTER_OWNER: i64 = 302;
    pub const LEAVE_OWNER: i64 = 303;
}

/// Integer that may arrive as a JSON number or a numeric string.
fn de_opt_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(json_i64))
}

/// String that may arrive as a JSON string or a number (ids do both).
fn de_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Lenient integer view of a JSON value.
pub fn json_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Lenient integer field lookup on a payload object.
pub fn field_i64(payload: &Value, key: &str) -> Option<i64> {
    payload.get(key).and_then(json_i64)
}

/// String field lookup on a payload object.
pub fn field_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

/// Comment posted by a viewer (`t` = 1).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ViewComment {
    #[serde(rename = "cm", default)]
    pub comment: Option<String>,
    #[serde(rename = "ac", default)]
    pub username: Option<String>,
    #[serde(rename = "u", default, deserialize_with = "de_opt_i64")]
    pub user_id: Option<i64>,
    #[serde(rename = "av", default, deserialize_with = "de_opt_i64")]
    pub avatar_id: Option<i64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub rad: Option<f64>,
}

/// Gift thrown by a viewer (`t` = 2).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThrowGifts {
    #[serde(rename = "u", default, deserialize_with = "de_opt_i64")]
    pub user_id: Option<i64>,
    #[serde(rename = "av", default, deserialize_with = "de_opt_i64")]
    pub avatar_id: Option<i64>,
    #[serde(rename = "g", default, deserialize_with = "de_opt_i64")]
    pub gift_id: Option<i64>,
    #[serde(rename = "n", default, deserialize_with = "de_opt_i64")]
    pub quantity: Option<i64>,
    #[serde(rename = "ac", default)]
    pub username: Option<String>,
    /// 1 if the throw must be shown in the timeline.
    #[serde(rename = "h", default, deserialize_with = "de_opt_i64")]
    pub show_timeline: Option<i64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub rad: Option<f64>,
}

/// Ballot opened (`t` = 3), e.g.
/// `{"l":[{"id":10001},{"id":10002}],"created_at":1499267246,"n":10,"i":3,"t":3}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StartVote {
    /// Options to display; each element carries an `id`.
    #[serde(rename = "l", default)]
    pub list: Option<Value>,
    #[serde(rename = "i", default, deserialize_with = "de_opt_i64")]
    pub options: Option<i64>,
    #[serde(rename = "n", default, deserialize_with = "de_opt_i64")]
    pub votes: Option<i64>,
}

/// Ballot closed (`t` = 4); `l` holds per-option results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndVote {
    #[serde(rename = "l", default)]
    pub results: Option<Value>,
    #[serde(rename = "i", default)]
    pub image_url: Option<String>,
    #[serde(rename = "v", default)]
    pub version: Option<String>,
}

/// Goal-meter gauge update (`t` = 5).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SupportGauge {
    #[serde(rename = "p", default, deserialize_with = "de_opt_i64")]
    pub point: Option<i64>,
    /// 1 if fireworks should be shown.
    #[serde(rename = "c", default, deserialize_with = "de_opt_i64")]
    pub firework: Option<i64>,
}

/// Special-gift log entry (`t` = 11).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GiftLog {
    #[serde(rename = "av", default, deserialize_with = "de_opt_i64")]
    pub avatar_id: Option<i64>,
    #[serde(rename = "ac", default)]
    pub username: Option<String>,
    #[serde(rename = "g", default, deserialize_with = "de_opt_i64")]
    pub gift_id: Option<i64>,
    #[serde(rename = "n", default, deserialize_with = "de_opt_i64")]
    pub quantity: Option<i64>,
}

/// Performance-time start (`t` = 12). No live examples observed; field
/// types are kept open.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PerformanceTime {
    #[serde(rename = "pid", default, deserialize_with = "de_opt_i64")]
    pub pid: Option<i64>,
    #[serde(rename = "pt", default)]
    pub performance_type: Option<Value>,
    #[serde(rename = "sat", default)]
    pub started_at: Option<Value>,
    #[serde(rename = "btbpc", default)]
    pub background_pic: Option<Value>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub created_at: Option<i64>,
}

/// Bravo-time result (`t` = 15). No live examples observed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BravoResult {
    #[serde(rename = "pid", default, deserialize_with = "de_opt_i64")]
    pub pid: Option<i64>,
    #[serde(rename = "uu", default)]
    pub unique_users: Option<Value>,
    #[serde(rename = "tp", default)]
    pub total_points: Option<Value>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub created_at: Option<i64>,
}

/// Legacy comment form (`t` = 301).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyViewComment {
    #[serde(rename = "cm", default)]
    pub comment: Option<String>,
    #[serde(rename = "ac", default)]
    pub username: Option<String>,
    #[serde(rename = "u", default, deserialize_with = "de_opt_i64")]
    pub user_id: Option<i64>,
    #[serde(rename = "av", default, deserialize_with = "de_opt_i64")]
    pub avatar_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct EndLiveFields {
    #[serde(rename = "a", default, deserialize_with = "de_opt_string")]
    anteroom: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct TimestampedFields {
    #[serde(default, deserialize_with = "de_opt_i64")]
    created_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct UserFields {
    #[serde(rename = "u", default, deserialize_with = "de_opt_i64")]
    user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct TelopFields {
    #[serde(default)]
    telop: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct SpeakFields {
    #[serde(default, deserialize_with = "de_opt_i64")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    created_at: Option<i64>,
}

/// One decoded push message.
///
/// Closed over every `t` code the service is known to emit; anything else
/// lands in `Unknown` with the full payload attached. Dispatch is an
/// exhaustive `match`, so growing the taxonomy is a compile-checked change.
#[derive(Debug, Clone, PartialEq)]
pub enum BroadcastEvent {
    ViewComment(ViewComment),
    ThrowGifts(ThrowGifts),
    StartVote(StartVote),
    EndVote(EndVote),
    SupportGauge(SupportGauge),
    TwitterIcon { user_id: Option<i64> },
    SetTelop { telop: Option<String> },
    HideTelop,
    GiftLog(GiftLog),
    StartPerformanceTime(PerformanceTime),
    StartBravoTime,
    FinishBravoTime,
    ResultBravoTime(BravoResult),
    Speak { id: Option<i64>, created_at: Option<i64> },
    FetchAvatar,
    /// Terminates the session by default.
    EndLive { anteroom: Option<String> },
    /// Undocumented refresh sent around vote start/end.
    VoteRefresh { created_at: Option<i64> },
    ReloadVideo { created_at: Option<i64> },
    StartLive,
    LegacyViewComment(LegacyViewComment),
    EnterOwner,
    LeaveOwner,
    Unknown(Value),
}

impl BroadcastEvent {
    /// Classify a decoded MSG payload by its `t` field.
    ///
    /// Fails only when `t` itself is missing or non-integer; unknown codes
    /// are not an error.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let t = payload
            .get("t")
            .and_then(json_i64)
            .ok_or_else(|| {
                LivecastError::MalformedPayload("missing or non-integer message type".to_owned())
            })?;

        let event = match t {
            code::VIEW_COMMENT => Self::ViewComment(extract(payload)?),
            code::THROW_GIFTS => Self::ThrowGifts(extract(payload)?),
            code::START_VOTE => Self::StartVote(extract(payload)?),
            code::END_VOTE => Self::EndVote(extract(payload)?),
            code::CHANGE_SUPPORT_GAUGE => Self::SupportGauge(extract(payload)?),
            code::SET_TWITTER_ICON => {
                let f: UserFields = extract(payload)?;
                Self::TwitterIcon { user_id: f.user_id }
            }
            code::SET_TELOP => {
                let f: TelopFields = extract(payload)?;
                Self::SetTelop { telop: f.telop }
            }
            code::HIDE_TELOP => Self::HideTelop,
            code::ADD_GIFT_LOG => Self::GiftLog(extract(payload)?),
            code::START_PERFORMANCE_TIME => Self::StartPerformanceTime(extract(payload)?),
            code::START_BRAVO_TIME => Self::StartBravoTime,
            code::FINISH_BRAVO_TIME => Self::FinishBravoTime,
            code::RESULT_BRAVO_TIME => Self::ResultBravoTime(extract(payload)?),
            code::SPEAK => {
                let f: SpeakFields = extract(payload)?;
                Self::Speak {
                    id: f.id,
                    created_at: f.created_at,
                }
            }
            code::FETCH_AVATAR => Self::FetchAvatar,
            code::END_LIVE => {
                let f: EndLiveFields = extract(payload)?;
                Self::EndLive {
                    anteroom: f.anteroom,
                }
            }
            code::VOTE_REFRESH => {
                let f: TimestampedFields = extract(payload)?;
                Self::VoteRefresh {
                    created_at: f.created_at,
                }
            }
            code::RELOAD_VIDEO => {
                let f: TimestampedFields = extract(payload)?;
                Self::ReloadVideo {
                    created_at: f.created_at,
                }
            }
            code::START_LIVE => Self::StartLive,
            code::VIEW_COMMENT_OLD => Self::LegacyViewComment(extract(payload)?),
            code::ENTER_OWNER => Self::EnterOwner,
            code::LEAVE_OWNER => Self::LeaveOwner,
            _ => Self::Unknown(payload.clone()),
        };
        Ok(event)
    }
}

fn extract<'de, T: Deserialize<'de>>(payload: &'de Value) -> Result<T> {
    T::deserialize(payload).map_err(|e| LivecastError::MalformedPayload(e.to_string()))
}
