use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use posts_client::{Post, PostsClient, UpdatePostRequest};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the posts gateway
    #[arg(short, long, env = "POSTS_SERVER", default_value = "http://localhost:8080")]
    server: String,

    /// Print raw JSON instead of a summary
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    List,

    Get {
        #[arg(short, long)]
        id: String,
    },

    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        body: String,
    },

    Update {
        #[arg(short, long)]
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        body: Option<String>,
    },

    Delete {
        #[arg(short, long)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = PostsClient::new(cli.server.clone());

    if !cli.json {
        println!("🔌 Connecting to: {}", client.base_url());
    }

    match &cli.command {
        Commands::List => match client.list_posts().await {
            Ok(posts) => {
                if cli.json {
                    return print_json(&posts);
                }

                println!("✅ Found {} posts", posts.len());
                println!();

                if posts.is_empty() {
                    println!("   No posts found");
                    println!("   Tip: posts-cli create --title \"My Post\" --body \"Hello\"");
                } else {
                    for (i, post) in posts.iter().enumerate() {
                        println!("   {}. [{}] {}", i + 1, post.id, post.title);
                        println!("      Created: {}", post.created_at);
                        println!("      Body: {}", truncate(&post.body, 50));
                        println!();
                    }
                }
            }
            Err(e) => fail(format!("Failed to list posts: {}", e)),
        },

        Commands::Get { id } => match client.get_post(id).await {
            Ok(post) => {
                if cli.json {
                    return print_json(&post);
                }
                println!("✅ Post retrieved:");
                print_post(&post);
            }
            Err(e) if e.is_not_found() => fail(format!("Post {} not found", id)),
            Err(e) => fail(format!("Error: {}", e)),
        },

        Commands::Create { title, body } => match client.create_post(title, body).await {
            Ok(post) => {
                if cli.json {
                    return print_json(&post);
                }
                println!("✅ Post created successfully!");
                print_post(&post);
            }
            Err(e) => fail(format!("Failed to create post: {}", e)),
        },

        Commands::Update { id, title, body } => {
            let request = UpdatePostRequest {
                title: title.clone(),
                body: body.clone(),
            };

            match client.update_post(id, &request).await {
                Ok(post) => {
                    if cli.json {
                        return print_json(&post);
                    }
                    println!("✅ Post updated successfully!");
                    print_post(&post);
                }
                Err(e) if e.is_not_found() => fail(format!("Post {} not found", id)),
                Err(e) => fail(format!("Failed to update post: {}", e)),
            }
        }

        Commands::Delete { id } => match client.delete_post(id).await {
            Ok(()) => {
                if !cli.json {
                    println!("✅ Post {} deleted", id);
                }
            }
            Err(e) if e.is_not_found() => fail(format!("Post {} not found", id)),
            Err(e) => fail(format!("Failed to delete post: {}", e)),
        },
    }

    Ok(())
}

fn print_post(post: &Post) {
    println!("   ID: {}", post.id);
    println!("   Title: {}", post.title);
    println!("   Body: {}", post.body);
    println!("   Created: {}", post.created_at);
    println!("   Updated: {}", post.updated_at);
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode JSON output")?;
    println!("{}", json);
    Ok(())
}

fn fail(message: String) -> ! {
    eprintln!("❌ {}", message);
    std::process::exit(1);
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
