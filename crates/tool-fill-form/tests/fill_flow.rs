use autofill_core_types::{CanonicalField, CanonicalRecord, PageContext, SiteId};
use field_locator::{FieldMappingTable, SiteMapping};
use tool_fill_form::{
    ChoiceOption, FieldOutcome, FillError, FormFiller, MemoryControl, MemoryPage, PageEvent,
};

const URL: &str = "https://consumerhelpline.gov.in/user/register-complaint.php";

fn ctx() -> PageContext {
    PageContext::new(URL, SiteId::ConsumerHelpline)
}

fn helpline_page() -> MemoryPage {
    MemoryPage::new(vec![
        MemoryControl::select(
            "state",
            vec![
                ChoiceOption::new("", "-- Select --"),
                ChoiceOption::new("KA", "Karnataka"),
                ChoiceOption::new("TN", "Tamil Nadu"),
            ],
        ),
        MemoryControl::input("purchaseCity"),
        MemoryControl::select(
            "sectorIndustry",
            vec![
                ChoiceOption::new("1", "Banking"),
                ChoiceOption::labelled("E-Commerce Sector"),
            ],
        ),
        MemoryControl::textarea("natureOfGrievance"),
    ])
}

#[test]
fn spec_scenario_counts_only_mapped_fields() {
    let record = CanonicalRecord::builder()
        .set(CanonicalField::State, "Karnataka")
        .set(CanonicalField::City, "Bangalore")
        .set(CanonicalField::GrievanceNarrative, "damaged item")
        .build();
    let mapping = SiteMapping::new()
        .with_field(CanonicalField::State, ["select[name=\"state\"]"])
        .with_field(
            CanonicalField::GrievanceNarrative,
            ["textarea[name=\"natureOfGrievance\"]"],
        );
    let page = helpline_page();

    let result = FormFiller::new()
        .fill(record, &ctx(), &mapping, &page)
        .unwrap();

    assert_eq!(result.attempted(), 2);
    assert_eq!(result.filled(), 2);
    assert_eq!(
        result.outcome(CanonicalField::City),
        Some(&FieldOutcome::NoLocatorPresent)
    );
    assert_eq!(page.value_of("select[name=state]").as_deref(), Some("KA"));
    assert_eq!(
        page.value_of("textarea[name=natureOfGrievance]").as_deref(),
        Some("damaged item")
    );
    assert_eq!(page.value_of("input[name=purchaseCity]").as_deref(), Some(""));
}

#[test]
fn builtin_table_falls_through_to_generic_locators() {
    let table = FieldMappingTable::builtin();
    let page = helpline_page();
    let record = CanonicalRecord::sample();

    let result = FormFiller::new()
        .fill(record, &ctx(), table.for_site(SiteId::ConsumerHelpline), &page)
        .unwrap();

    assert_eq!(
        result.outcome(CanonicalField::City),
        Some(&FieldOutcome::FilledByLocator {
            rank: 4,
            locator: "input[name=\"purchaseCity\"]".into()
        })
    );
    assert_eq!(
        page.value_of("select[name=sectorIndustry]").as_deref(),
        Some("E-Commerce Sector")
    );
    // company, category, value range and dealer info have no control here
    assert_eq!(result.attempted(), 8);
    assert_eq!(result.filled(), 4);
    assert_eq!(
        result.outcome(CanonicalField::Company),
        Some(&FieldOutcome::NoMatch)
    );
}

#[test]
fn free_text_write_emits_input_then_change() {
    let page = helpline_page();
    let record = CanonicalRecord::builder()
        .set(CanonicalField::City, "Mysuru")
        .build();
    let mapping = SiteMapping::new().with_field(CanonicalField::City, ["input[name=purchaseCity]"]);

    FormFiller::new()
        .fill(record, &ctx(), &mapping, &page)
        .unwrap();

    assert_eq!(
        page.events_of("input[name=purchaseCity]"),
        vec![PageEvent::Input, PageEvent::Change]
    );
    assert_eq!(
        page.events_of("select[name=state]"),
        Vec::<PageEvent>::new()
    );
}

#[test]
fn choice_write_emits_single_change() {
    let page = helpline_page();
    let record = CanonicalRecord::builder()
        .set(CanonicalField::State, "tamil nadu")
        .build();
    let mapping = SiteMapping::new().with_field(CanonicalField::State, ["#missing", "select[name=state]"]);

    let result = FormFiller::new()
        .fill(record, &ctx(), &mapping, &page)
        .unwrap();

    assert_eq!(page.value_of("select[name=state]").as_deref(), Some("TN"));
    assert_eq!(page.events_of("select[name=state]"), vec![PageEvent::Change]);
    assert_eq!(
        result.outcome(CanonicalField::State).unwrap().label(),
        "filled-by-locator-2"
    );
}

#[test]
fn resolved_element_that_rejects_value_does_not_stop_the_chain() {
    let page = MemoryPage::new(vec![
        MemoryControl::input("city").read_only(),
        MemoryControl::input("purchaseCity"),
    ]);
    let record = CanonicalRecord::builder()
        .set(CanonicalField::City, "Pune")
        .build();
    let mapping = SiteMapping::new().with_field(
        CanonicalField::City,
        ["input[name=city]", "input[name=purchaseCity]"],
    );

    let result = FormFiller::new()
        .fill(record, &ctx(), &mapping, &page)
        .unwrap();

    assert_eq!(result.filled(), 1);
    assert_eq!(page.value_of("input[name=city]").as_deref(), Some(""));
    assert_eq!(
        page.value_of("input[name=purchaseCity]").as_deref(),
        Some("Pune")
    );
}

#[test]
fn unmatched_option_is_no_match() {
    let page = helpline_page();
    let record = CanonicalRecord::builder()
        .set(CanonicalField::State, "Goa")
        .build();
    let mapping = SiteMapping::new().with_field(CanonicalField::State, ["select[name=state]"]);

    let result = FormFiller::new()
        .fill(record, &ctx(), &mapping, &page)
        .unwrap();

    assert_eq!(result.attempted(), 1);
    assert_eq!(result.filled(), 0);
    assert_eq!(
        result.outcome(CanonicalField::State),
        Some(&FieldOutcome::NoMatch)
    );
    assert_eq!(page.value_of("select[name=state]").as_deref(), Some(""));
}

#[test]
fn placeholder_option_never_clears_a_chosen_value() {
    let page = MemoryPage::new(vec![MemoryControl::select(
        "sector",
        vec![
            ChoiceOption::new("", "-- Select Sector --"),
            ChoiceOption::new("BNK", "Banking"),
        ],
    )
    .with_value("BNK")]);
    let record = CanonicalRecord::builder()
        .set(CanonicalField::Sector, "Sector")
        .build();
    let mapping = SiteMapping::new().with_field(CanonicalField::Sector, ["select[name=sector]"]);

    let result = FormFiller::new()
        .fill(record, &ctx(), &mapping, &page)
        .unwrap();

    assert_eq!(result.filled(), 0);
    assert_eq!(
        result.outcome(CanonicalField::Sector),
        Some(&FieldOutcome::NoMatch)
    );
    assert_eq!(page.value_of("select[name=sector]").as_deref(), Some("BNK"));
    assert!(page.events_of("select[name=sector]").is_empty());
}

#[test]
fn second_fill_keeps_counts_and_emits_nothing_new() {
    let table = FieldMappingTable::builtin();
    let mapping = table.for_site(SiteId::ConsumerHelpline);
    let page = helpline_page();
    let filler = FormFiller::new();

    let first = filler
        .fill(CanonicalRecord::sample(), &ctx(), mapping, &page)
        .unwrap();
    let events_after_first = page.events_of("textarea[name=natureOfGrievance]");
    let second = filler
        .fill(CanonicalRecord::sample(), &ctx(), mapping, &page)
        .unwrap();

    assert_eq!(first.attempted(), second.attempted());
    assert_eq!(first.filled(), second.filled());
    assert_eq!(
        page.events_of("textarea[name=natureOfGrievance]"),
        events_after_first
    );
    assert!(second.generation > first.generation);
}

#[test]
fn empty_values_are_never_attempted() {
    let mapping = FieldMappingTable::builtin()
        .for_site(SiteId::ConsumerHelpline)
        .clone();
    let fields = CanonicalField::ALL;
    // every subset of the first four fields, with the rest left blank
    for mask in 0u8..16 {
        let mut builder = CanonicalRecord::builder();
        for (bit, field) in fields.iter().take(4).enumerate() {
            let value = if mask & (1 << bit) != 0 { "Karnataka" } else { "" };
            builder = builder.set(*field, value);
        }
        let result = FormFiller::new()
            .fill(builder.build(), &ctx(), &mapping, &helpline_page())
            .unwrap();
        assert_eq!(result.attempted(), mask.count_ones() as usize);
        assert!(result.filled() <= result.attempted());
    }
}

#[test]
fn overlapping_fill_on_same_page_is_refused() {
    let filler = FormFiller::new();
    let _held = filler.guard().try_acquire(URL).unwrap();

    let err = filler
        .fill(
            CanonicalRecord::sample(),
            &ctx(),
            &SiteMapping::new(),
            &helpline_page(),
        )
        .unwrap_err();
    assert!(matches!(err, FillError::InProgress { generation: 1, .. }));
}
