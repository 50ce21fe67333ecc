use serde_json::Value;

/// HTTP methods the API accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }

    /// Whether a JSON body is sent with this method
    pub fn carries_body(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "DELETE" => Ok(Method::Delete),
            _ => Err(format!("Unknown method: {}", s)),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One call against the API endpoint. The `action` query parameter selects
/// the server-side operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub action: String,
    pub body: Option<Value>,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, action: &str) -> Self {
        Self {
            method,
            action: action.to_string(),
            body: None,
            params: Vec::new(),
        }
    }

    pub fn get(action: &str) -> Self {
        Self::new(Method::Get, action)
    }

    pub fn post(action: &str) -> Self {
        Self::new(Method::Post, action)
    }

    pub fn delete(action: &str) -> Self {
        Self::new(Method::Delete, action)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Query parameters in wire order, `action` first
    pub fn query(&self) -> Vec<(&str, &str)> {
        std::iter::once(("action", self.action.as_str()))
            .chain(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect()
    }
}
