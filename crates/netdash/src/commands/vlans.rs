//! VLAN command handlers.

use tabled::Tabled;

use netdash_core::{Session, VlanConfig};

use crate::cli::{GlobalOpts, VlansArgs, VlansCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "VLAN")]
    id: u16,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Hosts")]
    hosts: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&VlanConfig> for VlanRow {
    fn from(v: &VlanConfig) -> Self {
        Self {
            id: v.id,
            network: v.network.clone(),
            hosts: usable_hosts(v),
            description: v.description.clone(),
        }
    }
}

/// Usable host addresses in the pool, excluding network and broadcast.
fn usable_hosts(v: &VlanConfig) -> String {
    v.subnet()
        .map_or_else(|| "-".into(), |net| net.size().saturating_sub(2).to_string())
}

fn detail(v: &VlanConfig) -> String {
    let mut lines = vec![
        format!("VLAN:        {}", v.id),
        format!("Network:     {}", v.network),
        format!("Description: {}", v.description),
    ];
    if let Some(net) = v.subnet() {
        lines.push(format!("Netmask:     {}", net.mask()));
        lines.push(format!("Broadcast:   {}", net.broadcast()));
        lines.push(format!("Hosts:       {}", usable_hosts(v)));
    }
    lines.join("\n")
}

pub async fn handle(
    session: &Session,
    args: VlansArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VlansCommand::List => {
            let vlans = session.catalog().list_vlans();
            let out = output::render_list(&global.output, vlans, |v| VlanRow::from(v), |v| {
                v.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VlansCommand::Get { id } => {
            let vlan = session.select_vlan(id).await?;
            let out = output::render_single(&global.output, &vlan, detail, |v| v.network.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
