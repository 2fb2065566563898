use zeroize::Zeroizing;

pub struct GeneratedKey {
    pub public: Vec<u8>,
    pub private: Zeroizing<Vec<u8>>,
}
