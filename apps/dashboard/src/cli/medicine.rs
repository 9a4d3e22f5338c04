use std::io::Write;

use clap::{Args, Subcommand};
use pharma_core::{MedicineForm, MedicineId};
use pharma_dashboard::commands::inventory::{
    delete_medicine, open_edit_medicine, open_new_medicine, save_medicine, update_medicine_form,
};
use pharma_dashboard::error::AppResult;
use pharma_dashboard::render;
use pharma_dashboard::state::InventoryState;

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct MedicineCommand {
    #[command(subcommand)]
    command: MedicineSubcommand,
}

#[derive(Debug, Subcommand)]
enum MedicineSubcommand {
    /// Add a medicine to the catalog
    Add(MedicineFields),
    /// Change fields of an existing medicine
    Update(UpdateArgs),
    /// Remove a medicine from the catalog
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Medicine id
    id: MedicineId,

    #[command(flatten)]
    fields: MedicineFields,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Medicine id
    id: MedicineId,
}

/// Form fields as typed; validation happens when the form is saved.
#[derive(Debug, Default, Args)]
struct MedicineFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    generic: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    batch: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    expiry: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    cost_price: Option<String>,
    #[arg(long)]
    mrp: Option<String>,
    #[arg(long)]
    supplier: Option<String>,
}

impl MedicineFields {
    /// Overwrites the form fields that were given on the command line.
    fn apply(self, form: &mut MedicineForm) {
        let fields = [
            (self.name, &mut form.medicine_name),
            (self.generic, &mut form.generic_name),
            (self.category, &mut form.category),
            (self.batch, &mut form.batch_no),
            (self.expiry, &mut form.expiry_date),
            (self.quantity, &mut form.quantity),
            (self.cost_price, &mut form.cost_price),
            (self.mrp, &mut form.mrp),
            (self.supplier, &mut form.supplier),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

pub(crate) async fn run(command: MedicineCommand, ctx: &Context) -> AppResult<()> {
    let state = InventoryState::default();

    match command.command {
        MedicineSubcommand::Add(fields) => {
            open_new_medicine(&state)?;
            update_medicine_form(&state, |form| fields.apply(form))?;
            let saved = save_medicine(&ctx.backend, &state, ctx.page_size()).await?;
            ctx.print(&saved, |out| {
                writeln!(out, "Added medicine #{}", saved.id)?;
                render::write_medicine(out, &saved, &ctx.currency)
            })
        }
        MedicineSubcommand::Update(args) => {
            open_edit_medicine(&ctx.backend, &state, args.id).await?;
            update_medicine_form(&state, |form| args.fields.apply(form))?;
            let saved = save_medicine(&ctx.backend, &state, ctx.page_size()).await?;
            ctx.print(&saved, |out| {
                writeln!(out, "Updated medicine #{}", saved.id)?;
                render::write_medicine(out, &saved, &ctx.currency)
            })
        }
        MedicineSubcommand::Delete(args) => {
            delete_medicine(&ctx.backend, &state, args.id, ctx.page_size()).await?;
            ctx.print(&serde_json::json!({ "deleted": args.id }), |out| {
                writeln!(out, "Deleted medicine #{}", args.id)
            })
        }
    }
}
