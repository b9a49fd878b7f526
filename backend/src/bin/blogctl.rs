//! Administrative commands for a PostgreSQL-backed blog: migrations plus
//! creating and removing accounts, groups and posts.
//!
//! Removing an account removes its posts. Removing a group keeps its posts
//! without a group.

use std::env;
use std::io::{self, BufRead};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use tokio::runtime::Builder;

use yatube::domain::ports::{GroupRepository, PostRepository, UserRepository};
use yatube::domain::{GroupSlug, NewGroup, PostId, User, UserId, Username, hash_password};
use yatube::outbound::persistence::{
    DbPool, DieselGroupRepository, DieselPostRepository, DieselUserRepository, PoolConfig,
    run_pending_migrations,
};

const DATABASE_URL_ENV: &str = "YATUBE_DATABASE_URL";

/// `blogctl` command arguments.
#[derive(Debug, Parser)]
#[command(name = "blogctl", about = "Maintain a Yatube database", version)]
struct CliArgs {
    /// Database connection URL. Falls back to `YATUBE_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Create an account; the password is read from the first line of stdin.
    CreateUser {
        username: String,
        /// Grant access to staff operations such as clearing the page cache.
        #[arg(long)]
        staff: bool,
    },
    /// Create a group posts can be filed under.
    CreateGroup {
        slug: String,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove an account and every post it wrote.
    DeleteUser { username: String },
    /// Remove a group; its posts remain without a group.
    DeleteGroup { slug: String },
    /// Remove a single post.
    DeletePost { id: i64 },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let database_url = resolve_database_url(args.database_url)?;

    match args.command {
        Command::Migrate => {
            let applied = run_pending_migrations(&database_url).wrap_err("migration failed")?;
            println!("applied {applied} migration(s)");
            Ok(())
        }
        command => {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .wrap_err("failed to build runtime")?;
            runtime.block_on(run(command, database_url))
        }
    }
}

async fn run(command: Command, database_url: String) -> Result<()> {
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(1))
        .await
        .wrap_err("failed to create database pool")?;

    match command {
        Command::Migrate => Err(eyre!("migrations run without the async runtime")),
        Command::CreateUser { username, staff } => {
            let username = Username::new(username).wrap_err("invalid username")?;
            let password = read_password()?;
            let hash = hash_password(&password).wrap_err("failed to hash password")?;
            let user = User::new(UserId::random(), username, hash, staff);
            DieselUserRepository::new(pool)
                .insert(&user)
                .await
                .wrap_err("failed to store user")?;
            println!("created user {} ({})", user.username(), user.id());
            Ok(())
        }
        Command::CreateGroup {
            slug,
            title,
            description,
        } => {
            let slug = GroupSlug::new(slug).wrap_err("invalid slug")?;
            let group = NewGroup::new(title, slug, description).wrap_err("invalid group")?;
            let groups = DieselGroupRepository::new(pool);
            let stored = groups
                .insert(&group)
                .await
                .wrap_err("failed to store group")?;
            println!("created group {} ({})", stored.slug(), stored.id());
            Ok(())
        }
        Command::DeleteUser { username } => {
            let username = Username::new(username).wrap_err("invalid username")?;
            let users = DieselUserRepository::new(pool);
            let user = users
                .find_by_username(&username)
                .await
                .wrap_err("failed to look up user")?
                .ok_or_else(|| eyre!("no user named {username}"))?;
            users
                .delete(user.id())
                .await
                .wrap_err("failed to delete user")?;
            println!("deleted user {username} and their posts");
            Ok(())
        }
        Command::DeleteGroup { slug } => {
            let slug = GroupSlug::new(slug).wrap_err("invalid slug")?;
            let groups = DieselGroupRepository::new(pool);
            let group = groups
                .find_by_slug(&slug)
                .await
                .wrap_err("failed to look up group")?
                .ok_or_else(|| eyre!("no group with slug {slug}"))?;
            groups
                .delete(group.id())
                .await
                .wrap_err("failed to delete group")?;
            println!("deleted group {slug}");
            Ok(())
        }
        Command::DeletePost { id } => {
            let id = PostId::new(id);
            let removed = DieselPostRepository::new(pool)
                .delete(id)
                .await
                .wrap_err("failed to delete post")?;
            if !removed {
                return Err(eyre!("no post with id {id}"));
            }
            println!("deleted post {id}");
            Ok(())
        }
    }
}

fn resolve_database_url(cli_value: Option<String>) -> Result<String> {
    cli_value
        .or_else(|| env::var(DATABASE_URL_ENV).ok())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| eyre!("missing --database-url and {DATABASE_URL_ENV} is unset"))
}

fn read_password() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_owned();
    if password.is_empty() {
        return Err(eyre!("password must not be empty"));
    }
    Ok(password)
}
