use serde::Serialize;

use agri_core::Listing;
use agri_publish::{ListingComposer, ListingDraft};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::listing::ListingCreateArgs;
use crate::commands::shared::alert;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Spinner;

#[derive(Serialize)]
struct ListingCreateResponse {
    message: &'static str,
    listing: Listing,
}

pub async fn handle(
    args: &ListingCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut composer = compose(args)?;
    let session = ctx.session.current();

    let spinner = Spinner::start(&format!(
        "Publishing listing with {} photo(s)",
        composer.draft().images().len()
    ));
    let listing = match composer
        .publish(session.as_ref(), &ctx.uploader, &ctx.listings)
        .await
    {
        Ok(listing) => listing,
        Err(error) => {
            spinner.finish_err("Publish failed");
            return Err(alert::publish_error(&error));
        }
    };
    spinner.finish_ok("Listing published");

    output(
        &ListingCreateResponse {
            message: "Listing published successfully!",
            listing,
        },
        flags.format,
    )
}

/// Fill a composer from the command line, enforcing the photo limit as
/// images are added.
fn compose(args: &ListingCreateArgs) -> anyhow::Result<ListingComposer> {
    let mut draft = ListingDraft::default();
    draft.nomenclature.clone_from(&args.nomenclature);
    draft.classification = args.classification.clone().unwrap_or_default();
    draft.narrative = args.narrative.clone().unwrap_or_default();
    draft.provenance_certified = !args.no_provenance;
    draft.logistics_provided = args.logistics;
    draft.set_price(&args.price);

    let mut composer = ListingComposer::with_draft(draft);
    for image in &args.images {
        composer
            .add_image(image.source, image.path.as_str())
            .map_err(|error| alert::publish_error(&error))?;
    }
    Ok(composer)
}
