use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of a successful login. `roles` may be omitted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Paging parameters appended as a query string to paged list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub direction: SortDirection,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: "name".to_string(),
            direction: SortDirection::Asc,
        }
    }
}

impl PageQuery {
    pub fn sorted_by(sort: &str, direction: SortDirection) -> Self {
        Self {
            sort: sort.to_string(),
            direction,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32, size: u32) -> Self {
        self.page = page;
        self.size = size;
        self
    }

    pub fn to_query_string(&self) -> String {
        format!(
            "page={}&size={}&sort={}&direction={}",
            self.page,
            self.size,
            self.sort,
            self.direction.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_query_matches_backend_defaults() {
        assert_eq!(
            PageQuery::default().to_query_string(),
            "page=0&size=10&sort=name&direction=asc"
        );
    }

    #[test]
    fn login_response_without_roles() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"token":"abc","username":"ops"}"#).unwrap();
        assert!(response.roles.is_empty());
    }
}
