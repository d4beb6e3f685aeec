mod metadata_provider;
