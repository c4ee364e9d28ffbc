//! Page content: the induction ranklist and the data upload page.

use std::collections::HashMap;

use crate::fleet::Train;
use crate::validate::form::{FieldError, FieldKind, FieldSpec};
use crate::validate::upload::FieldContext;

use super::components::{field_error, status_ribbon, submit_button, tooltip_attrs};
use super::escape_html;

/// Fields of the induction contact form.
pub const INDUCTION_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "operator_name",
        label: "Operator name",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSpec {
        name: "operator_email",
        label: "Contact email",
        kind: FieldKind::Email,
        required: true,
    },
    FieldSpec {
        name: "remarks",
        label: "Remarks",
        kind: FieldKind::Text,
        required: false,
    },
];

fn fleet_csv_field() -> (FieldContext, &'static str) {
    (FieldContext::new("file-input", ".csv"), "Fleet data (CSV)")
}

fn fleet_excel_field() -> (FieldContext, &'static str) {
    (
        FieldContext::new("excel-upload", ".xlsx,.xls"),
        "Fleet data (Excel)",
    )
}

fn certificate_field() -> (FieldContext, &'static str) {
    (
        FieldContext::new("certificate-upload", ".pdf,.jpg,.jpeg,.png"),
        "Fitness certificate",
    )
}

/// The page's upload fields, by element id.
///
/// The validation endpoint resolves a field id back to its declared
/// context here, so the category logic always sees the same id/accept
/// pair the page rendered.
#[must_use]
pub fn upload_field_context(id: &str) -> Option<(FieldContext, &'static str)> {
    match id {
        "file-input" => Some(fleet_csv_field()),
        "excel-upload" => Some(fleet_excel_field()),
        "certificate-upload" => Some(certificate_field()),
        _ => None,
    }
}

/// Induction ranklist page content.
#[must_use]
pub fn ranklist_page(fleet: &[Train]) -> String {
    let rows: String = fleet.iter().map(ranklist_row).collect();
    format!(
        r#"<div class="d-flex align-items-center justify-content-between mb-3">
    <h1 class="h4 mb-0">Tonight's Induction Ranklist</h1>
    <span class="text-muted small" {hint}>Hover a status for operator notes</span>
</div>
<div class="card shadow-sm">
    <div class="table-responsive">
        <table class="table table-hover align-middle mb-0">
            <thead class="table-light">
                <tr>
                    <th>Rank</th>
                    <th>Train</th>
                    <th>Status</th>
                    <th>Mileage (km)</th>
                    <th>Stabling bay</th>
                    <th>Cleaning</th>
                    <th>Last service</th>
                </tr>
            </thead>
            <tbody>
                {rows}
            </tbody>
        </table>
    </div>
</div>"#,
        hint = tooltip_attrs("Status notes come from the depot operators"),
    )
}

fn ranklist_row(train: &Train) -> String {
    format!(
        r#"<tr>
    <td>{rank}</td>
    <td><span class="fw-semibold">{number}</span> <span class="text-muted">{name}</span></td>
    <td>
        <span class="{badge}" {tooltip}>{label}</span>
        {ribbon}
    </td>
    <td>{mileage}</td>
    <td>{bay}</td>
    <td>{cleaning}</td>
    <td>{service}</td>
</tr>"#,
        rank = train.rank,
        number = escape_html(train.number),
        name = escape_html(train.name),
        badge = train.status.badge_class(),
        tooltip = tooltip_attrs(train.notes),
        label = train.status.label(),
        ribbon = status_ribbon(train.status.ribbon_class(), "", train.notes),
        mileage = train.mileage_km,
        bay = escape_html(train.stabling_bay),
        cleaning = escape_html(train.cleaning_status),
        service = escape_html(train.last_service),
    )
}

/// Data upload page content: drop zone, upload fields, and the induction
/// contact form.
#[must_use]
pub fn upload_page(csrf_token: &str) -> String {
    let (csv_ctx, csv_label) = fleet_csv_field();
    let (excel_ctx, excel_label) = fleet_excel_field();
    let (cert_ctx, cert_label) = certificate_field();

    format!(
        r#"<h1 class="h4 mb-3">Fleet Data Upload</h1>
<div class="row g-4">
    <div class="col-lg-6">
        <div class="card shadow-sm p-3">
            <div class="upload-zone rounded border border-2 border-dashed p-4 text-center" x-data
                 x-on:dragover.prevent="$el.classList.add('dragover')"
                 x-on:dragleave.prevent="$el.classList.remove('dragover')"
                 x-on:drop.prevent="$el.classList.remove('dragover'); const input = $el.querySelector('input[type=file]') || document.getElementById('file-input') || document.getElementById('certificate-upload'); if (input && $event.dataTransfer.files.length) {{ input.files = $event.dataTransfer.files; input.dispatchEvent(new Event('change', {{ bubbles: true }})); }}">
                <p class="mb-2">Drag a file here, or pick one below.</p>
                {csv_field}
            </div>
            {excel_field}
            {cert_field}
        </div>
    </div>
    <div class="col-lg-6">
        {form}
    </div>
</div>"#,
        csv_field = upload_field(&csv_ctx, csv_label, None),
        excel_field = upload_field(&excel_ctx, excel_label, None),
        cert_field = upload_field(&cert_ctx, cert_label, None),
        form = induction_form(&HashMap::new(), &[], csrf_token),
    )
}

/// One upload field wrapper.
///
/// Picking a file posts it straight to the validation endpoint; the
/// response replaces this wrapper (emptied on rejection, annotated with
/// the accepted file name on success). Dropped files land here too, via
/// the zone's change dispatch, so both paths run the same validator.
#[must_use]
pub fn upload_field(context: &FieldContext, label: &str, accepted: Option<&str>) -> String {
    let note = match accepted {
        Some(name) => format!(
            r#"<div class="form-text text-success">Selected: {}</div>"#,
            escape_html(name)
        ),
        None => String::new(),
    };
    format!(
        r##"<div class="upload-field mb-3 text-start" id="{id}-field">
    <label class="form-label" for="{id}">{label}</label>
    <input type="file" class="form-control" id="{id}" name="file" accept="{accept}"
           hx-post="/api/uploads/validate?field_id={id}"
           hx-encoding="multipart/form-data"
           hx-trigger="change"
           hx-target="#{id}-field"
           hx-swap="outerHTML">
    {note}
</div>"##,
        id = context.id,
        accept = context.accept,
        label = escape_html(label),
    )
}

/// The induction contact form, re-rendered in full on every submit.
///
/// Each failing field carries exactly one error line; fields that now
/// pass come back clean because the whole fragment is rebuilt from the
/// latest validation run.
#[must_use]
pub fn induction_form(
    values: &HashMap<String, String>,
    errors: &[FieldError],
    csrf_token: &str,
) -> String {
    let fields: String = INDUCTION_FIELDS
        .iter()
        .map(|spec| {
            let value = values.get(spec.name).map(String::as_str).unwrap_or("");
            let error = errors.iter().find(|e| e.field == spec.name);
            form_field(spec, value, error)
        })
        .collect();

    format!(
        r#"<form id="induction-form" class="card shadow-sm p-3" novalidate
      hx-post="/api/induction"
      hx-target="this"
      hx-swap="outerHTML"
      hx-disabled-elt="find button[type=submit]">
    <h2 class="h6 mb-3">Induction contact</h2>
    <input type="hidden" name="csrfmiddlewaretoken" value="{csrf}">
    {fields}
    {submit}
</form>"#,
        csrf = escape_html(csrf_token),
        submit = submit_button("induction-submit", "Save entry", "Saving..."),
    )
}

fn form_field(spec: &FieldSpec, value: &str, error: Option<&FieldError>) -> String {
    let input_type = match spec.kind {
        FieldKind::Text => "text",
        FieldKind::Email => "email",
    };
    let invalid = if error.is_some() { " is-invalid" } else { "" };
    let required = if spec.required { " required" } else { "" };
    let feedback = error.map(|e| field_error(e.message)).unwrap_or_default();

    format!(
        r#"<div class="mb-3">
    <label class="form-label" for="{name}">{label}</label>
    <input type="{input_type}" class="form-control{invalid}" id="{name}" name="{name}" value="{value}"{required}>
    {feedback}
</div>"#,
        name = spec.name,
        label = escape_html(spec.label),
        value = escape_html(value),
    )
}
