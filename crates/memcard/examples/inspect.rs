use std::env;
use std::fs;
use std::process;

use memcard::MemoryCard;

fn main() -> std::io::Result<()> {
    let path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example inspect -- <path-to-memcard>");
        process::exit(1);
    });

    let data = fs::read(&path)?;
    let card = MemoryCard::new(data);

    if !card.is_valid() {
        eprintln!("{}", card.reason());
        process::exit(1);
    }

    if let Some(sb) = card.superblock() {
        println!("version:               {}", sb.version);
        println!("page size:             {} bytes", sb.page_size);
        println!("pages per cluster:     {}", sb.pages_per_cluster);
        println!("cluster size:          {} bytes", sb.cluster_size);
        println!("pages per erase block: {}", sb.pages_per_erase_block);
        println!("clusters per card:     {}", sb.clusters_per_card);
        println!("root dir offset:       {}", sb.root_dir_offset);
        println!("root dir cluster:      {}", sb.root_dir_cluster);
        println!("backup blocks:         {} / {}", sb.backup_block_1, sb.backup_block_2);
        println!("indirect FAT clusters: {:?}", sb.indirect_fat_clusters);
        println!("bad erase blocks:      {:?}", sb.bad_block_erase_list);
        println!("card type:             {}", sb.card_type);
        println!("card flags:            {:?}", sb.card_flags);
    }

    Ok(())
}
