use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "book-cli")]
#[command(about = "Command-line client for the book proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all books
    List,
    /// Fetch one book by id
    Get { id: i64 },
    /// Create a book from a JSON document
    Create { json: String },
    /// Replace a book with a JSON document
    Update { id: i64, json: String },
    /// Delete a book by id
    Delete { id: i64 },
    /// Search books by title, author and/or genre
    Search {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        genre: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();
    let books = format!("{}/proxy/books", cli.url.trim_end_matches('/'));

    let request = match cli.command {
        Commands::List => client.get(&books),
        Commands::Get { id } => client.get(format!("{}/{}", books, id)),
        Commands::Create { json } => client
            .post(&books)
            .header(CONTENT_TYPE, "application/json")
            .body(json),
        Commands::Update { id, json } => client
            .put(format!("{}/{}", books, id))
            .header(CONTENT_TYPE, "application/json")
            .body(json),
        Commands::Delete { id } => client.delete(format!("{}/{}", books, id)),
        Commands::Search { title, author, genre } => client
            .get(format!("{}/search", books))
            .query(&search_params(title, author, genre)),
    };

    print_response(request.send().await?).await
}

/// Query pairs for the flags that were given, in title, author, genre order.
fn search_params(
    title: Option<String>,
    author: Option<String>,
    genre: Option<String>,
) -> Vec<(&'static str, String)> {
    [("title", title), ("author", author), ("genre", genre)]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    // Upstream bodies are opaque; pretty-print only when they are JSON.
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
