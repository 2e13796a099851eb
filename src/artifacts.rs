//! Lookup of compiled contracts in a Hardhat `artifacts` directory.
//!
//! Hardhat writes one artifact per contract at
//! `<root>/<sourceName>/<ContractName>.json`, next to a `.dbg.json` file that
//! points at the build info the contract was compiled in.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use ethers::abi::Abi;
use ethers::types::Bytes;
use eyre::{bail, Context};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::serde_utils;

const BUILD_INFO_DIR: &str = "build-info";
const DEBUG_FILE_SUFFIX: &str = ".dbg.json";

/// Either a bare `Name` or a fully-qualified `path/To.sol:Name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractName {
    pub source_name: Option<String>,
    pub contract_name: String,
}

impl ContractName {
    pub fn parse(name: &str) -> Self {
        match name.rsplit_once(':') {
            Some((source_name, contract_name)) => Self {
                source_name: Some(source_name.to_string()),
                contract_name: contract_name.to_string(),
            },
            None => Self {
                source_name: None,
                contract_name: name.to_string(),
            },
        }
    }

    fn file_name(&self) -> String {
        format!("{}.json", self.contract_name)
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source_name) = self.source_name.as_deref() {
            write!(f, "{}:{}", source_name, self.contract_name)
        } else {
            write!(f, "{}", self.contract_name)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    build_info: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildInfo {
    solc_version: String,
}

impl ContractArtifact {
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Compiler version recorded in the build info, if Hardhat left one
    pub async fn solc_version(&self) -> eyre::Result<Option<String>> {
        let debug_path = self.path.with_extension("dbg.json");

        if !debug_path.exists() {
            return Ok(None);
        }

        let debug_file: DebugFile =
            serde_utils::read_json(&debug_path).await?;

        let build_info_path = debug_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(debug_file.build_info);

        if !build_info_path.exists() {
            return Ok(None);
        }

        let build_info: BuildInfo =
            serde_utils::read_json(&build_info_path).await?;

        Ok(Some(build_info.solc_version))
    }
}

#[derive(Debug, Clone)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a deployable contract by its registered name
    #[instrument(skip(self))]
    pub async fn contract_factory(
        &self,
        name: &str,
    ) -> eyre::Result<ContractArtifact> {
        let name = ContractName::parse(name);

        let path = match name.source_name.as_deref() {
            Some(source_name) => {
                let path = self.root.join(source_name).join(name.file_name());

                if !path.exists() {
                    bail!("Artifact for contract \"{name}\" not found.");
                }

                path
            }
            None => self.find_unique(&name).await?,
        };

        debug!(path = %path.display(), "Found artifact");

        let mut artifact: ContractArtifact =
            serde_utils::read_json(&path).await.with_context(|| {
                format!("Reading artifact for contract \"{name}\"")
            })?;
        artifact.path = path;

        if artifact.bytecode.is_empty() {
            bail!(
                "Contract \"{}\" is abstract and can't be deployed.",
                artifact.fully_qualified_name()
            );
        }

        Ok(artifact)
    }

    async fn find_unique(&self, name: &ContractName) -> eyre::Result<PathBuf> {
        let file_name = name.file_name();

        let mut matches: Vec<_> = self
            .artifact_paths()
            .await?
            .into_iter()
            .filter(|path| path.file_name() == Some(OsStr::new(&file_name)))
            .collect();

        match matches.len() {
            0 => bail!("Artifact for contract \"{name}\" not found."),
            1 => Ok(matches.remove(0)),
            _ => {
                let candidates: Vec<_> = matches
                    .iter()
                    .map(|path| self.fully_qualified_name_of(path))
                    .collect();

                bail!(
                    "There are multiple artifacts for contract \"{name}\", please use a fully qualified name instead:\n{}",
                    candidates.join("\n")
                )
            }
        }
    }

    fn fully_qualified_name_of(&self, path: &Path) -> String {
        let source_name = path
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.root).ok())
            .map(|source| source.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();

        let contract_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        format!("{source_name}:{contract_name}")
    }

    /// Every contract artifact under the root, sorted
    async fn artifact_paths(&self) -> eyre::Result<Vec<PathBuf>> {
        let mut paths = vec![];
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries =
                tokio::fs::read_dir(&dir).await.with_context(|| {
                    format!("Reading artifacts from {}", dir.display())
                })?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;

                if file_type.is_dir() {
                    if dir == self.root
                        && entry.file_name() == BUILD_INFO_DIR
                    {
                        continue;
                    }

                    pending.push(path);
                } else if is_artifact_file(&path) {
                    paths.push(path);
                }
            }
        }

        paths.sort();

        Ok(paths)
    }
}

fn is_artifact_file(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str())
    else {
        return false;
    };

    file_name.ends_with(".json") && !file_name.ends_with(DEBUG_FILE_SUFFIX)
}
