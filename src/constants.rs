/// User agent string used in HTTP requests to identify this client
pub const USER_AGENT: &str = "preservica-client/0.1.0";
/// Header carrying the bearer token on every authenticated call
pub const ACCESS_TOKEN_HEADER: &str = "Preservica-Access-Token";
/// Path of the login exchange
pub const LOGIN_PATH: &str = "api/accesstoken/login";
/// Protocol used when neither the server string nor the configuration names one
pub const DEFAULT_PROTOCOL: &str = "https";
/// Default number of items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// Token lifetime in minutes assumed when the login response omits `validFor`
pub const DEFAULT_TOKEN_VALIDITY_MINUTES: i64 = 15;
/// Upper bound on the token lifetime taken from a login response, in minutes
pub const MAX_TOKEN_VALIDITY_MINUTES: i64 = 24 * 60;
/// Maximum number of token refreshes attempted for a single request
pub const MAX_TOKEN_REFRESHES: u32 = 1;
/// Default credentials file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "credentials.properties";

/// Environment variable holding the username
pub const ENV_USERNAME: &str = "PRESERVICA_USERNAME";
/// Environment variable holding the password
pub const ENV_PASSWORD: &str = "PRESERVICA_PASSWORD";
/// Environment variable holding the tenant
pub const ENV_TENANT: &str = "PRESERVICA_TENANT";
/// Environment variable holding the server host name
pub const ENV_SERVER: &str = "PRESERVICA_SERVER";
/// Environment variable holding the protocol (http or https)
pub const ENV_PROTOCOL: &str = "PRESERVICA_PROTOCOL";
/// Environment variable pointing at an alternative credentials file
pub const ENV_CONFIG_FILE: &str = "PRESERVICA_CONFIG_FILE";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "PRESERVICA_TIMEOUT_SECS";
/// Environment variable holding the connect timeout in seconds
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "PRESERVICA_CONNECT_TIMEOUT_SECS";
/// Environment variable holding the default page size
pub const ENV_PAGE_SIZE: &str = "PRESERVICA_PAGE_SIZE";
