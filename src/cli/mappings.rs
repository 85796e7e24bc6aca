use anyhow::Result;
use autofill_core_types::SiteId;
use clap::Args;
use field_locator::SiteMapping;

use crate::cli::context::CliContext;

#[derive(Args, Clone, Debug)]
pub struct MappingsArgs {
    /// Only show the table used for this site
    #[arg(long)]
    pub site: Option<SiteId>,
}

pub fn cmd_mappings(args: MappingsArgs, ctx: &CliContext) -> Result<()> {
    let table = ctx.config().mapping_table();
    match args.site {
        Some(site) => {
            let mapping = table.for_site(site);
            ctx.output()
                .emit(mapping, || print_site(site, mapping, table.has_own_entry(site)))
        }
        None => ctx.output().emit(&table, || {
            println!("Locator tables (config: {})", ctx.config_path().display());
            for site in SiteId::ALL {
                print_site(site, table.for_site(site), table.has_own_entry(site));
            }
        }),
    }
}

fn print_site(site: SiteId, mapping: &SiteMapping, own_entry: bool) {
    if own_entry {
        println!("{site}");
    } else {
        println!("{site} (shares the default table)");
    }
    for (field, chain) in mapping.fields() {
        println!("  {}", field.name());
        for (rank, locator) in chain.ranked() {
            println!("    {rank}. {locator}");
        }
    }
}
