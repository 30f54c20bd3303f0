use chrono::{DateTime, Duration, Utc};
use clap::Args;

use crate::auth::{generate_jwt, Claims, Role};
use crate::config;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(long, default_value_t = 1, help = "User id placed in the sub claim")]
    pub user_id: i64,

    #[arg(long, default_value = "admin@example.com")]
    pub email: String,

    #[arg(long, default_value = "admin", help = "admin or user")]
    pub role: Role,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<i64>,
}

pub fn handle(args: TokenArgs) -> anyhow::Result<()> {
    let hours = args
        .hours
        .unwrap_or(config::config().security.jwt_expiry_hours as i64);
    let claims = Claims::with_expiry(args.user_id, args.email, args.role, Duration::hours(hours));
    let token = generate_jwt(&claims)?;

    let expires = DateTime::<Utc>::from_timestamp(claims.exp, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| claims.exp.to_string());
    eprintln!("{} token for user {} (expires {})", claims.role.as_str(), claims.sub, expires);
    println!("{}", token);
    Ok(())
}
