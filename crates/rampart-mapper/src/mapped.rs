use rampart_core::ApiError;

/// Result of mapping one failure
///
/// Most failures map to a single error. Adapters for bulk validation
/// reports may produce several.
#[derive(Debug, Clone)]
pub enum Mapped {
    One(ApiError),
    Many(Vec<ApiError>),
}

impl Mapped {
    pub fn errors(&self) -> &[ApiError] {
        match self {
            Self::One(err) => std::slice::from_ref(err),
            Self::Many(errors) => errors,
        }
    }

    pub fn len(&self) -> usize {
        self.errors().len()
    }

    /// Only possible for an empty `Many`, which the mapper treats as unhandled
    pub fn is_empty(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApiError> {
        self.errors().iter()
    }

    pub fn into_vec(self) -> Vec<ApiError> {
        match self {
            Self::One(err) => vec![err],
            Self::Many(errors) => errors,
        }
    }

    /// The single error, or `self` back when there are zero or several
    ///
    /// # Errors
    ///
    /// Returns the unchanged value unless it holds exactly one error
    pub fn into_single(self) -> Result<ApiError, Self> {
        match self {
            Self::One(err) => Ok(err),
            Self::Many(mut errors) if errors.len() == 1 => Ok(errors.remove(0)),
            other => Err(other),
        }
    }
}

impl From<ApiError> for Mapped {
    fn from(err: ApiError) -> Self {
        Self::One(err)
    }
}

impl From<Vec<ApiError>> for Mapped {
    fn from(errors: Vec<ApiError>) -> Self {
        Self::Many(errors)
    }
}

impl AsRef<[ApiError]> for Mapped {
    fn as_ref(&self) -> &[ApiError] {
        self.errors()
    }
}

impl IntoIterator for Mapped {
    type Item = ApiError;
    type IntoIter = std::vec::IntoIter<ApiError>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapped {
    type Item = &'a ApiError;
    type IntoIter = std::slice::Iter<'a, ApiError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
