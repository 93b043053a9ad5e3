//! vocab command - List vocabularies or show the values of one

use anyhow::{anyhow, Result};

use crate::models::registry::{lookup_vocabulary, VOCABULARIES};

/// Print the vocabulary table, or the entries of `name`.
pub fn vocab(name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        for vocabulary in VOCABULARIES {
            println!("{:<24} {} values", vocabulary.name, vocabulary.len());
        }
        return Ok(());
    };

    let vocabulary = lookup_vocabulary(name).ok_or_else(|| {
        anyhow!(
            "Unknown vocabulary '{}'. Run 'nmeta vocab' to list vocabularies.",
            name
        )
    })?;

    for (symbol, value) in vocabulary.entries {
        println!("{:<32} {}", symbol, value);
    }
    Ok(())
}
