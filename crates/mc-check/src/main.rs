use std::path::PathBuf;
use std::process;

use argh::FromArgs;
use colored::Colorize;
use mc_check::{check_image, Report};
use memcard::MemoryCard;

#[derive(FromArgs)]
/// Validate a PS2 memory-card image and print its superblock.
struct Args {
    /// path to the card image
    #[argh(positional)]
    image: PathBuf,

    /// emit a JSON report instead of human-readable output
    #[argh(switch)]
    json: bool,
}

fn main() {
    let args: Args = argh::from_env();

    let card = match check_image(&args.image) {
        Ok(card) => card,
        Err(err) => {
            eprintln!("{} {}: {err}", "error".red(), args.image.display());
            process::exit(2);
        }
    };

    if args.json {
        let report = Report::from_card(&card);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{} failed to serialize report: {err}", "error".red());
                process::exit(2);
            }
        }
    } else {
        print_human(&card);
    }

    process::exit(if card.is_valid() { 0 } else { 1 });
}

fn print_human(card: &MemoryCard) {
    if card.is_valid() {
        println!("{}", "PASS".green().bold());
    } else {
        println!("{} {}", "FAIL".red().bold(), card.reason());
    }

    let Some(sb) = card.superblock() else {
        return;
    };

    println!();
    println!("{:<22} {}", "version".dimmed(), sb.version);
    println!("{:<22} {} bytes", "page size".dimmed(), sb.page_size);
    println!("{:<22} {}", "pages per cluster".dimmed(), sb.pages_per_cluster);
    println!("{:<22} {} bytes", "cluster size".dimmed(), sb.cluster_size);
    println!(
        "{:<22} {}",
        "pages per erase block".dimmed(),
        sb.pages_per_erase_block
    );
    println!("{:<22} {}", "clusters per card".dimmed(), sb.clusters_per_card);
    println!("{:<22} {}", "root dir offset".dimmed(), sb.root_dir_offset);
    println!("{:<22} {}", "root dir cluster".dimmed(), sb.root_dir_cluster);
    println!(
        "{:<22} {} / {}",
        "backup blocks".dimmed(),
        sb.backup_block_1,
        sb.backup_block_2
    );
    println!(
        "{:<22} {:?}",
        "indirect FAT clusters".dimmed(),
        sb.indirect_fat_clusters
    );
    println!(
        "{:<22} {:?}",
        "bad erase blocks".dimmed(),
        sb.bad_block_erase_list
    );
    println!("{:<22} {}", "card type".dimmed(), sb.card_type);
    println!(
        "{:<22} ECC={} BAD_BLOCKS={} ERASE_ZEROS={}",
        "card flags".dimmed(),
        sb.card_flags.ecc,
        sb.card_flags.bad_blocks,
        sb.card_flags.erase_zeros
    );
}
