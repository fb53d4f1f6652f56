use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use roomviz::room::{RoomDescription, ValidationPolicy};
use roomviz::{build_prompt, Config, OpenAIImageClient, RoomValidator};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "roomctl", about = "CLI for the room visualisation service", version)]
struct Cli {
    /// Also require the door to fit on the front wall
    #[arg(global = true, long, env = "STRICT_DOOR_PLACEMENT")]
    strict_door: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a room description and print it normalized
    Validate {
        #[command(flatten)]
        room: RoomArgs,
    },
    /// Print the prompt that would be sent to the image model
    Prompt {
        #[command(flatten)]
        room: RoomArgs,
    },
    /// Generate an image and save it to disk
    Generate {
        #[command(flatten)]
        room: RoomArgs,
        /// Output path (defaults to <OUTPUT_DIR>/room-<uuid>.png)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
        /// Override OPENAI_BASE_URL
        #[arg(long)]
        base_url: Option<String>,
        /// Override GENERATION_TIMEOUT_SECS
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

/// Room fields; defaults match the web form.
#[derive(Args, Debug)]
struct RoomArgs {
    /// Read the room description from a JSON file instead of the flags below
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Wall colour or material
    #[arg(long, default_value = "Blue walls")]
    wall_finish: String,
    /// Door centerline distance from the left wall
    #[arg(long, default_value_t = 100)]
    door_offset_mm: i64,
    /// inward-right or inward-left
    #[arg(long, default_value = "inward-right")]
    door_swing: String,
    /// Ceiling height
    #[arg(long, default_value_t = 2500)]
    ceiling_height_mm: i64,
    /// Room width
    #[arg(long, default_value_t = 3000)]
    room_width_mm: i64,
    /// Room depth
    #[arg(long, default_value_t = 3000)]
    room_depth_mm: i64,
    /// Aesthetic, lighting and lens intent
    #[arg(long, default_value = "modern, photorealistic, neutral daylight, normal lens (35-50mm)")]
    style: String,
    /// 1024x1024, 1536x1024 or 1024x1536
    #[arg(long, default_value = "1536x1024")]
    output_size: String,
}

impl RoomArgs {
    /// Build the raw value the validator sees; values are passed through untouched.
    async fn raw(&self) -> Result<Value, Box<dyn std::error::Error>> {
        if let Some(path) = &self.file {
            let data = tokio::fs::read_to_string(path).await?;
            return Ok(serde_json::from_str(&data)?);
        }
        Ok(json!({
            "wallFinish": self.wall_finish,
            "doorOffsetMm": self.door_offset_mm,
            "doorSwing": self.door_swing,
            "ceilingHeightMm": self.ceiling_height_mm,
            "roomWidthMm": self.room_width_mm,
            "roomDepthMm": self.room_depth_mm,
            "style": self.style,
            "outputSize": self.output_size,
        }))
    }
}

async fn load_room(args: &RoomArgs, validator: &RoomValidator) -> Result<RoomDescription, Box<dyn std::error::Error>> {
    let raw = args.raw().await?;
    match validator.validate(&raw) {
        Ok(room) => Ok(room),
        Err(errors) => {
            eprintln!("{}", serde_json::to_string_pretty(&errors)?);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    Config::dotenv_load();
    let cli = Cli::parse();
    let validator = RoomValidator::new(ValidationPolicy { check_door_within_wall: cli.strict_door });

    match cli.command {
        Commands::Validate { room } => {
            let room = load_room(&room, &validator).await?;
            println!("{}", serde_json::to_string_pretty(&room.to_raw())?);
            Ok(())
        }
        Commands::Prompt { room } => {
            let room = load_room(&room, &validator).await?;
            println!("{}", build_prompt(&room));
            Ok(())
        }
        Commands::Generate { room, out, base_url, timeout_secs } => {
            let room = load_room(&room, &validator).await?;
            let mut conf = Config::new().map_err(|e| {
                eprintln!("Error: OPENAI_API_KEY must be set");
                e
            })?;
            if let Some(url) = base_url {
                conf.openai_base_url = url;
            }
            if let Some(secs) = timeout_secs {
                conf.generation_timeout_secs = secs;
            }

            let client = OpenAIImageClient::new(
                conf.openai_base_url.clone(),
                conf.openai_api_key.clone(),
                conf.image_model.clone(),
                conf.generation_timeout(),
            );
            let image = match client.generate_image(&build_prompt(&room), room.output_size()).await {
                Ok(image) => image,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let path = match out {
                Some(p) => p,
                None => {
                    let dir = PathBuf::from(&conf.output_dir);
                    tokio::fs::create_dir_all(&dir).await?;
                    dir.join(format!("room-{}.png", Uuid::new_v4()))
                }
            };
            tokio::fs::write(&path, &image.bytes).await?;
            println!("Saved {} ({} bytes)", path.display(), image.bytes.len());
            Ok(())
        }
    }
}
