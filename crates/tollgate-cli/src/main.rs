use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use tollgate_auth::TokenKind;
use tollgate_cli::{accounts, diagnostics};
use tollgate_config::{JwtConfig, PasswordConfig};

#[derive(Parser)]
#[command(name = "tollgate-cli")]
#[command(about = "Tollgate CLI - Administrative tools for Tollgate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user account
    CreateUser {
        /// Username (3 to 128 characters)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Verify a token with the configured public key and print its payload
    InspectToken {
        token: String,

        /// Require the token to be of this kind
        #[arg(short = 'k', long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Mint and verify a throwaway token pair with the configured keys
    CheckKeys,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Access,
    Refresh,
}

impl From<KindArg> for TokenKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Access => TokenKind::Access,
            KindArg::Refresh => TokenKind::Refresh,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tollgate_observability::init_basic_console_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateUser { username, password } => {
            handle_create_user(username, password).await
        }
        Commands::InspectToken { token, kind } => {
            handle_inspect_token(&token, kind.map(Into::into))
        }
        Commands::CheckKeys => handle_check_keys(),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}", message);
    std::process::exit(1);
}

fn load_jwt_config() -> JwtConfig {
    JwtConfig::from_env().unwrap_or_else(|e| fail(format!("Invalid JWT configuration: {}", e)))
}

async fn handle_create_user(username: Option<String>, password: Option<String>) {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .unwrap_or_else(|e| fail(format!("Failed to read username: {}", e))),
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail(format!("Failed to read password: {}", e))),
    };

    let database_url = tollgate_db::database_url_from_env();
    let pool = tollgate_db::connect_and_migrate(&database_url)
        .await
        .unwrap_or_else(|e| fail(format!("Failed to open database: {}", e)));

    let cost = PasswordConfig::from_env().bcrypt_cost;
    match accounts::create_user(&pool, &username, &password, cost).await {
        Ok(user) => {
            println!("\n✅ User created successfully!");
            println!("   Username: {}", user.username);
            println!("   Id: {}", user.id);
        }
        Err(e) => fail(format!("Error creating user: {:#}", e)),
    }
}

fn handle_inspect_token(token: &str, kind: Option<TokenKind>) {
    let config = load_jwt_config();
    match diagnostics::inspect_token(&config, token, kind) {
        Ok(payload) => {
            let rendered = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| fail(format!("Failed to render payload: {}", e)));
            println!("✅ Token is valid\n{}", rendered);
            if let Some(expires_at) = payload.expires_at() {
                println!("   Expires at: {}", expires_at.to_rfc3339());
            }
        }
        Err(e) => match e.reason() {
            Some(reason) => fail(format!("{} ({})", e, reason)),
            None => fail(e),
        },
    }
}

fn handle_check_keys() {
    let config = load_jwt_config();
    match diagnostics::check_keys(&config) {
        Ok(report) => {
            println!("✅ Key pair OK");
            println!("   Algorithm: {:?}", report.algorithm);
            println!("   Private key: {}", report.private_key_path.display());
            println!("   Public key: {}", report.public_key_path.display());
            println!("   Access expiry: {}", report.access_expires_at.to_rfc3339());
            println!("   Refresh expiry: {}", report.refresh_expires_at.to_rfc3339());
        }
        Err(e) => match e.reason() {
            Some(reason) => fail(format!("Key check failed: {} ({})", e, reason)),
            None => fail(format!("Key check failed: {}", e)),
        },
    }
}
