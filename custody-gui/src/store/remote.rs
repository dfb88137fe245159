/// Lifecycle of an asynchronous fetch.
///
/// Transitions belong to whoever performs the fetch; readers only ever
/// `match` on the current variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteData<T, E> {
    NotAsked,
    Loading,
    Success(T),
    Failure(E),
}

impl<T, E> Default for RemoteData<T, E> {
    fn default() -> Self {
        Self::NotAsked
    }
}

impl<T, E> RemoteData<T, E> {
    pub fn as_ref(&self) -> RemoteData<&T, &E> {
        match self {
            Self::NotAsked => RemoteData::NotAsked,
            Self::Loading => RemoteData::Loading,
            Self::Success(value) => RemoteData::Success(value),
            Self::Failure(error) => RemoteData::Failure(error),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> RemoteData<U, E> {
        match self {
            Self::NotAsked => RemoteData::NotAsked,
            Self::Loading => RemoteData::Loading,
            Self::Success(value) => RemoteData::Success(f(value)),
            Self::Failure(error) => RemoteData::Failure(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::NotAsked | Self::Loading | Self::Failure(_) => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for RemoteData<T, E> {
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_only_touches_success() {
        let loading: RemoteData<u32, String> = RemoteData::Loading;
        assert_eq!(loading.map(|v| v + 1), RemoteData::Loading);

        let failure: RemoteData<u32, String> = RemoteData::Failure("timeout".to_string());
        assert_eq!(
            failure.map(|v| v + 1),
            RemoteData::Failure("timeout".to_string())
        );

        let success: RemoteData<u32, String> = RemoteData::Success(41);
        assert_eq!(success.map(|v| v + 1), RemoteData::Success(42));
    }

    #[test]
    fn from_result() {
        let ok: Result<&str, ()> = Ok("kyc");
        assert_eq!(RemoteData::from(ok), RemoteData::Success("kyc"));
        assert!(RemoteData::<u8, &str>::from(Err("boom")).success().is_none());
        assert_eq!(RemoteData::<u8, ()>::default(), RemoteData::NotAsked);
    }
}
