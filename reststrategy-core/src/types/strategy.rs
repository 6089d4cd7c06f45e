use std::fmt;
use std::str::FromStr;

/// The HTTP interaction pattern an action follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Strategy {
    #[serde(rename = "GET/POST")]
    GetPost,
    #[serde(rename = "FIND/POST")]
    FindPost,
    #[serde(rename = "PUT/POST")]
    PutPost,
    #[serde(rename = "GET/PUT/POST")]
    GetPutPost,
    #[serde(rename = "FIND/PUT/POST")]
    FindPutPost,
    #[serde(rename = "FIND/PATCH/POST")]
    FindPatchPost,
    #[serde(rename = "FIND/DELETE/POST")]
    FindDeletePost,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "POST")]
    Post,
}

impl Strategy {
    pub const ALL: [Strategy; 9] = [
        Strategy::GetPost,
        Strategy::FindPost,
        Strategy::PutPost,
        Strategy::GetPutPost,
        Strategy::FindPutPost,
        Strategy::FindPatchPost,
        Strategy::FindDeletePost,
        Strategy::Put,
        Strategy::Post,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::GetPost => "GET/POST",
            Strategy::FindPost => "FIND/POST",
            Strategy::PutPost => "PUT/POST",
            Strategy::GetPutPost => "GET/PUT/POST",
            Strategy::FindPutPost => "FIND/PUT/POST",
            Strategy::FindPatchPost => "FIND/PATCH/POST",
            Strategy::FindDeletePost => "FIND/DELETE/POST",
            Strategy::Put => "PUT",
            Strategy::Post => "POST",
        }
    }

    /// Strategies that locate an existing resource with `findByJsonPathExpr`.
    pub fn requires_find_expr(&self) -> bool {
        matches!(
            self,
            Strategy::FindPost
                | Strategy::FindPutPost
                | Strategy::FindPatchPost
                | Strategy::FindDeletePost
        )
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim())
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}
