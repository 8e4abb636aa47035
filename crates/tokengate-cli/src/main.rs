use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use tokengate_core::hash_password;
use tokengate_db::{NewUser, PgPool, create_user, init_db_pool, run_migrations, set_user_active};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "tokengate-cli")]
#[command(about = "Tokengate CLI - User administration for the token service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a bcrypt hash for a password (no database needed)
    HashPassword {
        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create a user account
    CreateUser {
        /// Email address, used as the login identifier
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Grant superuser
        #[arg(long)]
        superuser: bool,

        /// Create the account deactivated
        #[arg(long)]
        inactive: bool,
    },
    /// Activate or deactivate an existing user
    SetActive {
        /// Email address of the user
        #[arg(short = 'e', long)]
        email: String,

        /// New active state
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::HashPassword { password } => handle_hash_password(password),
        Commands::CreateUser {
            email,
            full_name,
            password,
            superuser,
            inactive,
        } => {
            let pool = connect().await?;
            handle_create_user(&pool, email, full_name, password, superuser, !inactive).await
        }
        Commands::SetActive { email, active } => {
            let pool = connect().await?;
            handle_set_active(&pool, &email, active).await
        }
        Commands::Migrate => {
            let pool = connect().await?;
            run_migrations(&pool).await?;
            println!("\n✅ Migrations applied");
            Ok(())
        }
    }
}

async fn connect() -> CliResult<PgPool> {
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set for this command")?;
    Ok(init_db_pool(&database_url).await?)
}

fn prompt_password(password: Option<String>) -> CliResult<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?),
    }
}

fn hash(password: &str) -> CliResult<String> {
    hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error).into())
}

fn handle_hash_password(password: Option<String>) -> CliResult<()> {
    let password = prompt_password(password)?;
    println!("{}", hash(&password)?);
    Ok(())
}

async fn handle_create_user(
    pool: &PgPool,
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
    is_superuser: bool,
    is_active: bool,
) -> CliResult<()> {
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = prompt_password(password)?;

    let new_user = NewUser {
        email: email.trim().to_string(),
        full_name,
        password_hash: hash(&password)?,
        is_active,
        is_superuser,
    };

    let id = create_user(pool, &new_user)
        .await?
        .ok_or("User with this email already exists")?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", id);
    println!("   Email: {}", new_user.email);
    if !new_user.is_active {
        println!("   (inactive)");
    }
    Ok(())
}

async fn handle_set_active(pool: &PgPool, email: &str, active: bool) -> CliResult<()> {
    if !set_user_active(pool, email, active).await? {
        return Err(format!("No user with email {}", email).into());
    }

    let state = if active { "activated" } else { "deactivated" };
    println!("\n✅ User {} {}", email, state);
    Ok(())
}
