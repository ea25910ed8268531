use lrloc_core::{
    catalog_file_name, translate_lines, Catalog, DictionaryTranslator, Scanner, ScanStrategy,
};
use pretty_assertions::assert_eq;

const INFO_LUA: &str = r#"
return {
    LrSdkVersion = 6.0,
    LrToolkitIdentifier = "com.example.inat",
    LrPluginName = LOC "$$$/iNat/PluginName=iNaturalist Identifier",
    LrExportMenuItems = {
        title = LOC("$$$/iNat/Menu/Identify=Identify animal"),
        file = "AnimalIdentifier.lua",
    },
}
"#;

const DIALOG_LUA: &str = r#"
local LrDialogs = import "LrDialogs"

local function showResults(count, name)
    -- Mixed quotes and a placeholder across two physical lines
    LrDialogs.message(LOC("$$$/iNat/Results/Title=Found ^1 " ..
        'species'), LOC("$$$/iNat/Results/Body=Top match: " .. name))

    local help = LOC("$$$/iNat/Help=Select a photo first.\n"
        .. "Then run the identifier   again.")

    -- Same key, same text
    LrDialogs.message(LOC "$$$/iNat/PluginName=iNaturalist Identifier")
    -- Same key, different text
    LrDialogs.message(LOC "$$$/iNat/Menu/Identify=Identify bird")
    -- Not a translation literal
    LrDialogs.message(LOC("Plain text"))
end
"#;

fn build_catalog() -> Catalog {
    let scanner = Scanner::new();
    let mut catalog = Catalog::new();
    catalog.record_document(&scanner, "Info.lua", INFO_LUA);
    catalog.record_document(&scanner, "AnimalIdentifier.lua", DIALOG_LUA);
    catalog
}

#[test]
fn test_scan_plugin_document() {
    let results = Scanner::new().scan(DIALOG_LUA);
    let pairs: Vec<(&str, &str)> = results.iter().map(|r| r.pair()).collect();

    assert_eq!(
        pairs,
        vec![
            ("$$$/iNat/Results/Title", "Found {1} species"),
            ("$$$/iNat/Results/Body", "Top match:"),
            (
                "$$$/iNat/Help",
                "Select a photo first.\\n\\nThen run the identifier again."
            ),
            ("$$$/iNat/PluginName", "iNaturalist Identifier"),
            ("$$$/iNat/Menu/Identify", "Identify bird"),
        ]
    );
    assert!(results[1].truncated);
    assert!(!results[0].truncated);
}

#[test]
fn test_render_catalog() {
    let catalog = build_catalog();

    assert_eq!(
        catalog.render(),
        vec![
            "# Info.lua",
            "\"$$$/iNat/PluginName=iNaturalist Identifier\"",
            "\"$$$/iNat/Menu/Identify=Identify animal\"",
            "",
            "# AnimalIdentifier.lua",
            "\"$$$/iNat/Results/Title=Found {1} species\"",
            "\"$$$/iNat/Results/Body=Top match:\"",
            "\"$$$/iNat/Help=Select a photo first.\\n\\nThen run the identifier again.\"",
            "# DUPLICATE: \"$$$/iNat/PluginName=iNaturalist Identifier\"",
            "# CONFLICT: \"$$$/iNat/Menu/Identify=Identify bird\" (previous: Identify animal)",
            "",
        ]
    );

    let stats = catalog.stats();
    assert_eq!(stats.documents, 2);
    assert_eq!(stats.entries, 5);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.conflicts, 1);
}

#[test]
fn test_rendered_lines_have_no_real_newlines() {
    let catalog = build_catalog();
    assert!(catalog.render().iter().all(|line| !line.contains('\n')));
}

#[test]
fn test_rescanning_same_documents_only_annotates() {
    let scanner = Scanner::new();
    let mut catalog = build_catalog();
    let before = catalog.len();
    catalog.record_document(&scanner, "Info.lua", INFO_LUA);

    assert_eq!(catalog.len(), before);
    assert_eq!(catalog.stats().duplicates, 3);
}

#[test]
fn test_french_variant() {
    let catalog = build_catalog();
    let mut dictionary = DictionaryTranslator::from_catalog_text(
        "# Info.lua\n\"$$$/iNat/Menu/Identify=Identifier l'animal\"\n",
    )
    .unwrap();

    let (lines, stats) = translate_lines(catalog.render(), &mut dictionary);
    assert_eq!(lines[2], "\"$$$/iNat/Menu/Identify=Identifier l'animal\"");
    assert_eq!(lines[1], "\"$$$/iNat/PluginName=iNaturalist Identifier\"");
    assert_eq!(stats.translated, 1);
    assert_eq!(stats.untranslated, 4);
    assert_eq!(catalog_file_name("fr"), "TranslatedStrings_fr.txt");
}

#[test]
fn test_empty_documents() {
    let scanner = Scanner::new();
    let mut catalog = Catalog::new();
    catalog.record_document(&scanner, "Empty.lua", "local x = 1\n");

    assert!(catalog.is_empty());
    assert!(catalog.render().is_empty());
}
